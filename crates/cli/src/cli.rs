//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pony INS - plugin-based inertial navigation pipeline
#[derive(Parser, Debug)]
#[command(
    name = "pony-ins",
    author,
    version,
    about = "Plugin-based inertial navigation pipeline",
    long_about = "Runs a fixed-rate inertial navigation pipeline.\n\n\
                  Reads raw angular rate and specific force records, drives the \n\
                  registered plugins tick by tick and writes the navigation solution \n\
                  to a fixed-width text file."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PONY_INS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PONY_INS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the navigation pipeline
    Run(RunArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),

    /// Display the settings a configuration resolves to
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file (built-in sample configuration when omitted)
    #[arg(short, long, env = "PONY_INS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the sensor input file (`sensors_in`)
    #[arg(short, long, env = "PONY_INS_INPUT")]
    pub input: Option<PathBuf>,

    /// Override the navigation output file (`out`)
    #[arg(short, long, env = "PONY_INS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Stop after this many ticks (0 = until end of input)
    #[arg(long, default_value = "0", env = "PONY_INS_MAX_TICKS")]
    pub max_ticks: u64,

    /// Do not print progress to the console
    #[arg(long)]
    pub no_progress: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "PONY_INS_METRICS_PORT")]
    pub metrics_port: u16,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Validate configuration and exit without running the pipeline
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Configuration file to validate (built-in sample when omitted)
    #[arg(short, long, env = "PONY_INS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Configuration file (built-in sample when omitted)
    #[arg(short, long, env = "PONY_INS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
