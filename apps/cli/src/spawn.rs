use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use build_store::{ExternalPath, SwitchConfig};
use tracing::{info, warn};

use crate::config::{Workspace, containing_dir};
use crate::ui;

/// Companion executables started after a build is selected, in launch order.
const COMPANIONS: [ExternalPath; 2] = [ExternalPath::Neonite, ExternalPath::CarbonLauncher];

#[derive(Debug)]
pub enum LaunchOutcome {
    Started {
        target: ExternalPath,
        program: PathBuf,
        pid: u32,
    },
    Failed {
        target: ExternalPath,
        program: PathBuf,
        error: io::Error,
    },
}

impl LaunchOutcome {
    pub fn target(&self) -> ExternalPath {
        match self {
            LaunchOutcome::Started { target, .. } | LaunchOutcome::Failed { target, .. } => *target,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, LaunchOutcome::Started { .. })
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchOutcome::Started { program, pid, .. } => write!(
                f,
                "{} started from {} (pid {pid})",
                self.target().label(),
                program.display()
            ),
            LaunchOutcome::Failed { program, error, .. } => write!(
                f,
                "{} failed to start from {}: {error}",
                self.target().label(),
                program.display()
            ),
        }
    }
}

/// Starts every configured companion. A failed spawn is reported and the next one still runs.
pub fn launch_companions(workspace: &Workspace, config: &SwitchConfig) -> Vec<LaunchOutcome> {
    COMPANIONS
        .into_iter()
        .filter(|target| !config.external_path(*target).is_empty())
        .map(|target| {
            let program = workspace.resolve(config.external_path(target));
            launch(target, program)
        })
        .collect()
}

fn launch(target: ExternalPath, program: PathBuf) -> LaunchOutcome {
    let cwd = containing_dir(&program).to_path_buf();
    ui::info(format!(
        "Starting {} from {} in directory {}",
        target.label(),
        program.display(),
        cwd.display()
    ));

    match spawn_detached(&program, &cwd) {
        Ok(child) => {
            let pid = child.id();
            info!(program = %program.display(), pid, "started {}", target.label());
            ui::success(format!("{} started successfully.", program.display()));
            LaunchOutcome::Started {
                target,
                program,
                pid,
            }
        }
        Err(error) => {
            warn!(program = %program.display(), %error, "failed to start {}", target.label());
            ui::error(format!("Error starting {}: {error}", program.display()));
            LaunchOutcome::Failed {
                target,
                program,
                error,
            }
        }
    }
}

/// Spawns `program` without waiting on it. The returned child is dropped by callers, which
/// leaves the process running.
pub fn spawn_detached(program: &Path, cwd: &Path) -> io::Result<Child> {
    let mut command = Command::new(program);
    command.current_dir(cwd);

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;

        const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        command.creation_flags(CREATE_NEW_CONSOLE | CREATE_NEW_PROCESS_GROUP);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        command.process_group(0);
    }

    #[cfg(not(windows))]
    command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());

    command.spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_companions_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(dir.path());
        let config = SwitchConfig::default();

        assert!(launch_companions(&workspace, &config).is_empty());
    }

    #[test]
    fn missing_executable_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(dir.path());
        let mut config = SwitchConfig::default();
        config.set_external_path(ExternalPath::CarbonLauncher, "launcher/missing-launcher");

        let outcomes = launch_companions(&workspace, &config);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].target(), ExternalPath::CarbonLauncher);
        assert!(!outcomes[0].is_started());
    }

    #[test]
    fn failed_launch_summary_names_program() {
        let outcome = LaunchOutcome::Failed {
            target: ExternalPath::Neonite,
            program: PathBuf::from("neonite/app.exe"),
            error: io::Error::from(io::ErrorKind::NotFound),
        };
        let summary = outcome.to_string();
        assert!(summary.starts_with("Neonite failed to start from neonite/app.exe"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn child_leads_its_own_process_group() {
        let mut child = spawn_detached(Path::new("/bin/sh"), Path::new("/")).expect("spawn");
        let pid = child.id();
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).expect("stat");
        child.wait().expect("wait");

        // Fields after the parenthesized command: state, ppid, pgrp.
        let after_comm = &stat[stat.rfind(')').expect("comm") + 1..];
        let pgrp: u32 = after_comm
            .split_whitespace()
            .nth(2)
            .expect("pgrp")
            .parse()
            .expect("numeric pgrp");
        assert_eq!(pgrp, pid);
    }

    #[cfg(unix)]
    #[test]
    fn first_failure_does_not_block_second_launch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::new(dir.path());
        let mut config = SwitchConfig::default();
        config.set_external_path(ExternalPath::Neonite, "neonite/missing-neonite");
        config.set_external_path(ExternalPath::CarbonLauncher, "/bin/sh");

        let outcomes = launch_companions(&workspace, &config);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].target(), ExternalPath::Neonite);
        assert!(!outcomes[0].is_started());
        match &outcomes[1] {
            LaunchOutcome::Started { program, .. } => assert_eq!(program, Path::new("/bin/sh")),
            other => panic!("expected launcher to start, got {other:?}"),
        }
    }
}
