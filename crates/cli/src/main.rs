//! # Pony INS CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - Plugin registration and lifecycle driving
//! - Ctrl-C handling that still runs the terminate pass

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_pipeline, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "pony-ins starting");

    let result = match &cli.command {
        Commands::Run(args) => run_pipeline(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "command failed");
    }

    result
}

/// Initialize logging from the global flags; logs go to stderr
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init(observability::LoggingConfig {
        format: cli.log_format.into(),
        verbosity: observability::Verbosity::from_flags(cli.quiet, cli.verbose),
    })
}
