use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use build_store::{ConfigStore, Sidecar, SwitchConfig};

use crate::ui;

const CONFIG_DIR: &str = "config";
const BUILDS_FILE: &str = "builds.json";
const SIDECAR_FILE: &str = "carbon-config-path.txt";

/// Directory every relative path in a session is resolved against.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.root.join(CONFIG_DIR).join(BUILDS_FILE))
    }

    pub fn sidecar(&self) -> Sidecar {
        Sidecar::new(self.root.join(CONFIG_DIR).join(SIDECAR_FILE))
    }

    pub fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Directory that holds `path`. A filesystem root is its own container.
pub fn containing_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => path,
    }
}

/// Creates missing config files, then loads the builds document.
pub fn prepare(workspace: &Workspace) -> Result<SwitchConfig> {
    let store = workspace.store();
    if store.ensure().context("Failed to initialize builds config")? {
        ui::info(format!("Created missing file: {}", store.path().display()));
    }

    let sidecar = workspace.sidecar();
    if sidecar.ensure().context("Failed to initialize Carbon.config path file")? {
        ui::info(format!("Created missing file: {}", sidecar.path().display()));
    }

    store.load().context("Error loading configuration")
}
