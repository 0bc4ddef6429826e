use std::path::PathBuf;

use anyhow::{Context, Result};
use build_store::{SwitchConfig, write_launcher_config};
use tracing::debug;

use crate::commands::Outcome;
use crate::config::Workspace;
use crate::{spawn, ui};

pub fn run(workspace: &Workspace, config: &SwitchConfig, number: usize) -> Result<Outcome> {
    let build = config
        .build_by_number(number)
        .with_context(|| format!("No build numbered {number}"))?;

    let launcher_config = match resolve_launcher_config(workspace, config)? {
        Some(target) => {
            write_launcher_config(&target, build)
                .with_context(|| format!("Error updating {}", target.display()))?;
            ui::success(format!("Carbon.config updated with build {}!", build.name));
            Some(target)
        }
        None => {
            ui::error("Carbon.config path is not set. Use \"setpath\" to configure it.");
            None
        }
    };

    let launches = spawn::launch_companions(workspace, config);
    let started = launches.iter().filter(|launch| launch.is_started()).count();
    debug!(build = %build.name, started, total = launches.len(), "companions launched");

    Ok(Outcome::Selected {
        build: build.name.clone(),
        launcher_config,
        launches,
    })
}

/// The configured path wins; the sidecar file is the fallback.
fn resolve_launcher_config(workspace: &Workspace, config: &SwitchConfig) -> Result<Option<PathBuf>> {
    if !config.carbon_config_path.is_empty() {
        return Ok(Some(workspace.resolve(&config.carbon_config_path)));
    }
    let sidecar = workspace
        .sidecar()
        .read()
        .context("Failed to read Carbon.config path file")?;
    Ok(sidecar.map(|value| workspace.resolve(&value)))
}
