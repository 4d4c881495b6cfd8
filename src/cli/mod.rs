//! Command-line interface definitions.

pub mod blank;
pub mod check;
pub mod load;
pub mod output;
pub mod seed;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Foliogen - synthetic portfolio fixture generation.
#[derive(Parser, Debug)]
#[command(name = "foliogen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic portfolio dataset and seed the database
    Seed(SeedArgs),

    /// Create an empty database file
    Blank(BlankArgs),

    /// Apply a SQL fixture script to a fresh database
    Load(LoadArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `foliogen check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `seed` subcommand.
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Path to configuration file (built-in defaults when omitted and
    /// config.toml is absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the database path from config
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Seed the random source for a deterministic run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the account count
    #[arg(long)]
    pub accounts: Option<usize>,

    /// Override the issuer count (includes the cash issuer)
    #[arg(long)]
    pub issuers: Option<usize>,

    /// Override the security count (includes the cash security)
    #[arg(long)]
    pub securities: Option<usize>,

    /// Replace an existing database file
    #[arg(long)]
    pub force: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `blank` subcommand.
#[derive(Parser, Debug)]
pub struct BlankArgs {
    /// Database file to create
    #[arg(short, long, default_value = "data.db")]
    pub database: PathBuf,

    /// Replace an existing database file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `load` subcommand.
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// SQL script to execute
    pub script: PathBuf,

    /// Database file to create
    #[arg(short, long, default_value = "data.db")]
    pub database: PathBuf,

    /// Replace an existing database file
    #[arg(long)]
    pub force: bool,
}

/// Route a parsed invocation to its handler.
pub fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Seed(args) => seed::execute(args),
        Commands::Blank(args) => blank::execute(args),
        Commands::Load(args) => load::execute(args),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    }
}

/// Remove an existing database file when `force` is set; refuse to clobber
/// it otherwise.
pub(crate) fn prepare_database_path(path: &Path, force: bool) -> Result<()> {
    if path.exists() {
        if !force {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!(
                    "database file {} already exists (pass --force to replace it)",
                    path.display()
                ),
            )));
        }
        std::fs::remove_file(path)?;
    }
    Ok(())
}
