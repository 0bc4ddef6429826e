mod codec;
pub mod config;
mod error;
pub mod launcher;
pub mod store;

pub use crate::codec::{JSON_INDENT, encode_pretty};
pub use crate::config::{Build, DEFAULT_USERNAME, ExternalPath, SwitchConfig};
pub use crate::error::StoreError;
pub use crate::launcher::{LauncherSelection, write_launcher_config};
pub use crate::store::{ConfigStore, Sidecar};
