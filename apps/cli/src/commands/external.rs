use anyhow::{Context, Result};
use build_store::{ExternalPath, SwitchConfig};
use tracing::info;

use crate::commands::{Outcome, edit};
use crate::config::{Workspace, containing_dir};
use crate::prompt::Prompter;
use crate::ui;

/// Sets one of the external paths. A non-empty value must live in an existing directory;
/// an empty value clears the setting.
pub fn run(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
    target: ExternalPath,
) -> Result<Outcome> {
    let value = prompter.text(&prompt_for(target))?;

    if !value.is_empty() {
        let resolved = workspace.resolve(&value);
        let dir = containing_dir(&resolved);
        if !dir.is_dir() {
            ui::error(format!("Directory {} does not exist.", dir.display()));
            return Ok(Outcome::Rejected(dir.to_path_buf()));
        }
    }

    // A failed sidecar write must leave the builds document untouched.
    if target == ExternalPath::CarbonConfig {
        workspace
            .sidecar()
            .write(&value)
            .context("Failed to write Carbon.config path file")?;
    }
    config.set_external_path(target, value.clone());
    edit::save(workspace, config)?;

    info!(setting = target.keyword(), value = %value, "updated external path");
    if value.is_empty() {
        ui::success(format!("{} path cleared", target.label()));
    } else {
        ui::success(format!("{} path updated to {value}", target.label()));
    }
    Ok(Outcome::ExternalPathChanged(target))
}

fn prompt_for(target: ExternalPath) -> String {
    if target.is_executable() {
        format!("Enter the new {} executable path", target.label())
    } else {
        format!("Enter the new {} path", target.label())
    }
}
