use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::encode_pretty;
use crate::store::write_file;
use crate::{Build, StoreError};

/// The document the third-party launcher reads to pick its active build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LauncherSelection {
    pub name: String,
    pub path: String,
}

impl From<&Build> for LauncherSelection {
    fn from(build: &Build) -> Self {
        Self {
            name: build.name.clone(),
            path: build.path.clone(),
        }
    }
}

/// Overwrites the launcher config at `target` with the given build.
pub fn write_launcher_config(target: &Path, build: &Build) -> Result<LauncherSelection, StoreError> {
    let selection = LauncherSelection::from(build);
    let payload = encode_pretty(&selection)?;
    write_file(target, &payload)?;
    info!(file = %target.display(), build = %build.name, "wrote launcher config");
    Ok(selection)
}
