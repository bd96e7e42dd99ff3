//! CatPack CLI - Command-line interface for catalog library tools

pub mod commands;
pub mod progress;

use crate::config::Preferences;
use clap::Parser;
use commands::Commands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catpack")]
#[command(version, about = "CatPack: textures and furniture library tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preferences file (defaults to the user configuration directory)
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    /// Suppress progress bars
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub preferences: Preferences,
    /// File given with `--preferences`, if any
    pub preferences_path: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the CatPack CLI
///
/// # Errors
/// Returns an error if the preferences cannot be loaded or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let preferences = match &cli.preferences {
        Some(path) if path.exists() => Preferences::load_from(path)?,
        Some(_) => Preferences::default(),
        None => Preferences::load(),
    };
    let context = CliContext {
        preferences,
        preferences_path: cli.preferences,
        quiet: cli.quiet,
    };
    cli.command.execute(&context)?;

    Ok(())
}
