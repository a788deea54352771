//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default output file for `extract`
pub const DEFAULT_EXPORT_PATH: &str = "seed-room-export.json";

/// Seedport - Migrate Room seed data into the document store.
#[derive(Debug, Parser)]
#[command(name = "seedport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract seed records from a Kotlin initializer into JSON
    Extract(ExtractArgs),

    /// Upsert seed records into the document store
    Upsert(UpsertArgs),

    /// Run the deprecated REST API stub
    Serve(ServeArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Kotlin source file to scan
    pub input: PathBuf,

    /// Where to write the JSON export
    #[arg(default_value = DEFAULT_EXPORT_PATH)]
    pub output: PathBuf,
}

/// Arguments for the upsert command.
#[derive(Debug, Parser)]
pub struct UpsertArgs {
    /// Kotlin source file, or a `.json` export
    pub input: PathBuf,

    /// Service-account key file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Database file backing the document store
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Documents per write group
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Import into memory only; nothing is persisted
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
