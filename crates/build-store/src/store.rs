use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec::{decode, encode_pretty};
use crate::{StoreError, SwitchConfig};

/// The builds document on disk. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

/// Plain-text file holding a single path, read back trimmed.
#[derive(Debug, Clone)]
pub struct Sidecar {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the default document when the file is missing. Returns true if it was created.
    pub fn ensure(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&SwitchConfig::default())?;
        debug!(path = %self.path.display(), "created default builds config");
        Ok(true)
    }

    pub fn load(&self) -> Result<SwitchConfig, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let config = decode(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(config)
    }

    pub fn save(&self, config: &SwitchConfig) -> Result<(), StoreError> {
        let payload = encode_pretty(config)?;
        write_file(&self.path, &payload)?;
        debug!(path = %self.path.display(), builds = config.builds.len(), "saved builds config");
        Ok(())
    }
}

impl Sidecar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty sidecar when missing. Returns true if it was created.
    pub fn ensure(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        write_file(&self.path, b"")?;
        Ok(true)
    }

    /// Returns the stored path, or `None` when the file is missing or blank.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    pub fn write(&self, value: &str) -> Result<(), StoreError> {
        write_file(&self.path, value.as_bytes())
    }
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> ConfigStore {
        ConfigStore::new(dir.join("config").join("builds.json"))
    }

    #[test]
    fn ensure_creates_default_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        assert!(store.ensure().expect("ensure"));
        let text = fs::read_to_string(store.path()).expect("read");
        assert_eq!(
            text,
            "{\n    \"username\": \"DefaultUser\",\n    \"builds\": [],\n    \"carbonConfigPath\": \"\",\n    \"neonitePath\": \"\",\n    \"carbonLauncherPath\": \"\"\n}"
        );

        let mut config = store.load().expect("load");
        config.username = "someone".to_string();
        store.save(&config).expect("save");
        assert!(!store.ensure().expect("ensure again"));
        assert_eq!(store.load().expect("reload").username, "someone");
    }

    #[test]
    fn added_build_survives_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.ensure().expect("ensure");

        let mut config = store.load().expect("load");
        config.add_build("v27.11", "F:\\Fortnite Builds\\Big Bang Event v27.11");
        store.save(&config).expect("save");

        let reloaded = store.load().expect("reload");
        assert_eq!(reloaded.builds.len(), 1);
        assert_eq!(reloaded.builds[0].name, "v27.11");
        assert_eq!(reloaded, config);
    }

    #[test]
    fn save_is_idempotent_and_keeps_unknown_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(
            store.path(),
            r#"{"username":"me","builds":[{"name":"a","path":"b"}],"launcherPath":"x","zeta":{"n":1}}"#,
        )
        .expect("seed");

        let config = store.load().expect("load");
        store.save(&config).expect("save");
        let first = fs::read(store.path()).expect("read");

        store.save(&store.load().expect("reload")).expect("save again");
        let second = fs::read(store.path()).expect("read");

        assert_eq!(first, second);
        let reloaded = store.load().expect("final load");
        assert_eq!(reloaded.extra.get("launcherPath").and_then(|v| v.as_str()), Some("x"));
        assert!(reloaded.extra.contains_key("zeta"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "{ not json").expect("seed");

        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(store_in(dir.path()).load(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn sidecar_reads_trimmed_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sidecar = Sidecar::new(dir.path().join("config").join("carbon-config-path.txt"));

        assert_eq!(sidecar.read().expect("missing"), None);
        assert!(sidecar.ensure().expect("ensure"));
        assert_eq!(sidecar.read().expect("empty"), None);

        fs::write(sidecar.path(), "  C:\\Carbon\\Carbon.config \r\n").expect("seed");
        assert_eq!(
            sidecar.read().expect("read").as_deref(),
            Some("C:\\Carbon\\Carbon.config")
        );
        assert!(!sidecar.ensure().expect("ensure again"));
    }
}
