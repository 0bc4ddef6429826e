use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod prompt;
mod spawn;
mod ui;

#[derive(Parser)]
#[command(
    name = "build-switch",
    version,
    about = "Pick the active game build for the Carbon launcher"
)]
struct Cli {
    /// Directory holding config/builds.json; relative paths resolve against it
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let workspace = config::Workspace::new(cli.root);
    let mut prompter = prompt::stdin_prompter();

    let outcome = commands::run(&workspace, prompter.as_mut())?;
    tracing::info!(%outcome, root = %workspace.root().display(), "session finished");
    Ok(())
}
