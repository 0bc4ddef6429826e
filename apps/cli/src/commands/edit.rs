use anyhow::{Context, Result};
use build_store::SwitchConfig;
use tracing::info;

use crate::commands::Outcome;
use crate::config::Workspace;
use crate::prompt::Prompter;
use crate::ui;

const BUILD_PATH_EXAMPLE: &str = "F:\\Fortnite Builds\\Big Bang Event v27.11";

/// First-run flow for an empty build list. The session ends whatever the answer.
pub fn offer_first_build(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    ui::error("No builds found in builds.json.");
    if !prompter.confirm("Would you like to add a build?")? {
        return Ok(Outcome::Declined);
    }
    add_build(workspace, config, prompter)
}

pub fn add_build(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let name = prompter.text("Enter the build name")?;
    let path = prompter.text(&format!("Enter the build path (e.g., {BUILD_PATH_EXAMPLE})"))?;

    config.add_build(name.clone(), path);
    save(workspace, config)?;
    info!(build = %name, "added build");
    ui::success("Build added successfully.");
    Ok(Outcome::BuildAdded)
}

pub fn rename_build(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let old_name = prompter.text("Enter the current build name")?;
    let new_name = prompter.text("Enter the new build name")?;

    if !config.rename_build(&old_name, new_name.clone()) {
        ui::error(format!("Build {old_name} not found."));
        return Ok(Outcome::NotFound(old_name));
    }
    save(workspace, config)?;
    ui::success(format!("Build renamed to {new_name}!"));
    Ok(Outcome::Renamed)
}

pub fn change_build_path(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let name = prompter.text("Enter the build name to change the path for")?;
    let path = prompter.text("Enter the new path")?;

    if !config.set_build_path(&name, path) {
        ui::error(format!("Build {name} not found."));
        return Ok(Outcome::NotFound(name));
    }
    save(workspace, config)?;
    ui::success(format!("Path for {name} updated!"));
    Ok(Outcome::PathChanged)
}

pub fn change_username(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let username = prompter.text("Enter the new username")?;
    config.username = username;
    save(workspace, config)?;
    ui::success(format!("Username updated to {}!", config.username));
    Ok(Outcome::UsernameChanged)
}

pub(crate) fn save(workspace: &Workspace, config: &SwitchConfig) -> Result<()> {
    workspace
        .store()
        .save(config)
        .context("Error saving configuration")?;
    ui::info("Configuration saved successfully!");
    Ok(())
}
