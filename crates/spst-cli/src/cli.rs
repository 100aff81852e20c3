//! CLI argument definitions for the snapshot tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "spst",
    version,
    about = "Produce, load and inspect structure snapshot (.spst) files",
    long_about = "Produce, load and inspect structure snapshot (.spst) files.\n\n\
                  A structure database is described as JSON; snapshots hold every\n\
                  structure with its members, types, comments and sizes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Capture every structure in a database into a snapshot file.
    Produce(ProduceArgs),

    /// Replace the structures in a database with a snapshot's contents.
    Load(LoadArgs),

    /// Print the structures stored in a snapshot file.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ProduceArgs {
    /// JSON structure database to capture.
    #[arg(long = "database", value_name = "DB_JSON")]
    pub database: PathBuf,

    /// Snapshot file to create or overwrite.
    #[arg(long = "output", short = 'o', value_name = "SPST")]
    pub output: PathBuf,

    /// Skip fsync before the snapshot replaces the destination.
    #[arg(long = "no-sync")]
    pub no_sync: bool,
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Snapshot file to read.
    #[arg(value_name = "SPST")]
    pub input: PathBuf,

    /// JSON structure database to replace (created when missing).
    #[arg(long = "database", value_name = "DB_JSON")]
    pub database: PathBuf,

    /// Accept files whose body checksum does not match.
    #[arg(long = "skip-checksum")]
    pub skip_checksum: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Snapshot file to read.
    #[arg(value_name = "SPST")]
    pub input: PathBuf,

    /// List members under each structure.
    #[arg(long = "members")]
    pub members: bool,

    /// Output style.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: InspectFormatArg,

    /// Accept files whose body checksum does not match.
    #[arg(long = "skip-checksum")]
    pub skip_checksum: bool,
}

/// Inspect output styles.
#[derive(Clone, Copy, ValueEnum)]
pub enum InspectFormatArg {
    Table,
    Text,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
