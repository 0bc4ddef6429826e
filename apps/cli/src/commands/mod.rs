use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use build_store::{ExternalPath, SwitchConfig};
use tracing::debug;

use crate::config::{self, Workspace};
use crate::prompt::Prompter;
use crate::spawn::LaunchOutcome;
use crate::ui;

pub mod edit;
pub mod external;
pub mod select;

/// One menu choice. Every session handles exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 1-based number as shown in the menu.
    Select(usize),
    Add,
    Rename,
    ChangePath,
    ChangeUsername,
    SetExternal(ExternalPath),
    Invalid,
}

/// What a session did, reported back to `main` and to tests.
#[derive(Debug)]
pub enum Outcome {
    Selected {
        build: String,
        launcher_config: Option<PathBuf>,
        launches: Vec<LaunchOutcome>,
    },
    BuildAdded,
    Declined,
    Renamed,
    PathChanged,
    UsernameChanged,
    ExternalPathChanged(ExternalPath),
    NotFound(String),
    Rejected(PathBuf),
    Invalid,
}

impl Action {
    pub fn parse(input: &str, build_count: usize) -> Self {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return if (1..=build_count).contains(&number) {
                Action::Select(number)
            } else {
                Action::Invalid
            };
        }

        match input {
            "add" => Action::Add,
            "rename" => Action::Rename,
            "path" => Action::ChangePath,
            "username" => Action::ChangeUsername,
            other => ExternalPath::from_keyword(other)
                .map(Action::SetExternal)
                .unwrap_or(Action::Invalid),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Selected {
                build,
                launcher_config,
                launches,
            } => {
                write!(f, "selected {build}")?;
                match launcher_config {
                    Some(path) => write!(f, ", wrote {}", path.display())?,
                    None => write!(f, ", launcher config unset")?,
                }
                for launch in launches {
                    write!(f, "; {launch}")?;
                }
                Ok(())
            }
            Outcome::BuildAdded => write!(f, "build added"),
            Outcome::Declined => write!(f, "declined to add a build"),
            Outcome::Renamed => write!(f, "build renamed"),
            Outcome::PathChanged => write!(f, "build path changed"),
            Outcome::UsernameChanged => write!(f, "username changed"),
            Outcome::ExternalPathChanged(target) => write!(f, "{} path changed", target.label()),
            Outcome::NotFound(name) => write!(f, "build {name} not found"),
            Outcome::Rejected(dir) => write!(f, "rejected, {} is not a directory", dir.display()),
            Outcome::Invalid => write!(f, "invalid choice"),
        }
    }
}

/// Runs one interactive session: load, show the menu, handle one choice.
pub fn run(workspace: &Workspace, prompter: &mut dyn Prompter) -> Result<Outcome> {
    let mut config = config::prepare(workspace)?;

    if config.builds.is_empty() {
        return edit::offer_first_build(workspace, &mut config, prompter);
    }

    ui::print_builds(&config);
    ui::print_menu_hint(&config);
    let input = prompter.text("Choice")?;
    let action = Action::parse(&input, config.builds.len());
    debug!(?action, "dispatching menu choice");

    dispatch(workspace, &mut config, prompter, action)
}

pub fn dispatch(
    workspace: &Workspace,
    config: &mut SwitchConfig,
    prompter: &mut dyn Prompter,
    action: Action,
) -> Result<Outcome> {
    match action {
        Action::Select(number) => select::run(workspace, config, number),
        Action::Add => edit::add_build(workspace, config, prompter),
        Action::Rename => edit::rename_build(workspace, config, prompter),
        Action::ChangePath => edit::change_build_path(workspace, config, prompter),
        Action::ChangeUsername => edit::change_username(workspace, config, prompter),
        Action::SetExternal(target) => external::run(workspace, config, prompter, target),
        Action::Invalid => {
            ui::error("Invalid choice.");
            Ok(Outcome::Invalid)
        }
    }
}
