use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_USERNAME: &str = "DefaultUser";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwitchConfig {
    #[serde(deserialize_with = "username_or_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub builds: Vec<Build>,
    #[serde(deserialize_with = "null_as_default")]
    pub carbon_config_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub neonite_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carbon_launcher_path: String,
    /// Keys written by other tools sharing this file; carried through saves untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Build {
    pub name: String,
    pub path: String,
}

/// The externally configured paths a user can set from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalPath {
    CarbonConfig,
    Neonite,
    CarbonLauncher,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            builds: Vec::new(),
            carbon_config_path: String::new(),
            neonite_path: String::new(),
            carbon_launcher_path: String::new(),
            extra: Map::new(),
        }
    }
}

/// `null` loads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn username_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string()))
}

impl SwitchConfig {
    /// Username shown in the menu, falling back to the default when blank.
    pub fn display_username(&self) -> &str {
        if self.username.is_empty() {
            DEFAULT_USERNAME
        } else {
            &self.username
        }
    }

    /// 1-based lookup matching the menu numbering.
    pub fn build_by_number(&self, number: usize) -> Option<&Build> {
        number.checked_sub(1).and_then(|index| self.builds.get(index))
    }

    fn find_build_mut(&mut self, name: &str) -> Option<&mut Build> {
        self.builds.iter_mut().find(|build| build.name == name)
    }

    pub fn add_build(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.builds.push(Build {
            name: name.into(),
            path: path.into(),
        });
    }

    /// Renames the first build named `old_name`. Returns false when none matches.
    pub fn rename_build(&mut self, old_name: &str, new_name: impl Into<String>) -> bool {
        match self.find_build_mut(old_name) {
            Some(build) => {
                build.name = new_name.into();
                true
            }
            None => false,
        }
    }

    /// Repoints the first build named `name`. Returns false when none matches.
    pub fn set_build_path(&mut self, name: &str, path: impl Into<String>) -> bool {
        match self.find_build_mut(name) {
            Some(build) => {
                build.path = path.into();
                true
            }
            None => false,
        }
    }

    pub fn external_path(&self, target: ExternalPath) -> &str {
        match target {
            ExternalPath::CarbonConfig => &self.carbon_config_path,
            ExternalPath::Neonite => &self.neonite_path,
            ExternalPath::CarbonLauncher => &self.carbon_launcher_path,
        }
    }

    pub fn set_external_path(&mut self, target: ExternalPath, value: impl Into<String>) {
        let slot = match target {
            ExternalPath::CarbonConfig => &mut self.carbon_config_path,
            ExternalPath::Neonite => &mut self.neonite_path,
            ExternalPath::CarbonLauncher => &mut self.carbon_launcher_path,
        };
        *slot = value.into();
    }
}

impl ExternalPath {
    pub const ALL: [ExternalPath; 3] = [
        ExternalPath::CarbonConfig,
        ExternalPath::Neonite,
        ExternalPath::CarbonLauncher,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ExternalPath::CarbonConfig => "setpath",
            ExternalPath::Neonite => "setneonite",
            ExternalPath::CarbonLauncher => "setlauncher",
        }
    }

    pub fn from_keyword(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.keyword() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            ExternalPath::CarbonConfig => "Carbon.config",
            ExternalPath::Neonite => "Neonite",
            ExternalPath::CarbonLauncher => "Carbon Launcher",
        }
    }

    /// Whether the path names an executable to spawn rather than a file to write.
    pub fn is_executable(self) -> bool {
        !matches!(self, ExternalPath::CarbonConfig)
    }
}
