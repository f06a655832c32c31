//! # Observability
//!
//! Logging and Prometheus metrics for the navigation pipeline.
//!
//! Logs always go to stderr: stdout belongs to the progress counter and
//! to `--json` reports.
//!
//! ```ignore
//! observability::init(LoggingConfig {
//!     format: LogFormat::Compact,
//!     verbosity: Verbosity::from_flags(cli.quiet, cli.verbose),
//! })?;
//!
//! observability::record_tick(bus.tick(), bus.time());
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::metrics::{
    record_output_line, record_plugin_invocation, record_sensor_record, record_termination,
    record_tick, RunningStats, StatsSummary,
};

/// Crates whose events follow the requested verbosity; everything else
/// stays at `warn`.
const PIPELINE_TARGETS: &[&str] = &[
    "pony_ins",
    "contracts",
    "config_loader",
    "executor",
    "time_sync",
    "ingestion",
    "navigation",
    "dispatcher",
    "observability",
];

/// How chatty the pipeline is, from the `-q` / `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    /// Phase changes, file open/close, end of input
    #[default]
    Normal,
    /// Per-plugin summaries and skipped records in detail
    Debug,
    /// Every invocation
    Trace,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    fn level(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Filter directives used when `RUST_LOG` is not set
    pub fn directives(self) -> String {
        let level = self.level();
        PIPELINE_TARGETS
            .iter()
            .fold(String::from("warn"), |mut acc, target| {
                acc.push_str(&format!(",{target}={level}"));
                acc
            })
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, with source location
    Json,
    /// Multi-line, for reading a single run by eye
    Pretty,
    /// One line per event
    #[default]
    Compact,
}

/// Logging setup for one process
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbosity: Verbosity,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the verbosity when set. Fails if a subscriber is
/// already installed.
pub fn init(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.directives()));

    let layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    tracing::debug!(format = ?config.format, verbosity = ?config.verbosity, "logging initialized");
    Ok(())
}

/// Serve Prometheus metrics on `0.0.0.0:<port>` for the rest of the process
pub fn install_exporter(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .with_context(|| format!("failed to install Prometheus exporter on port {port}"))?;

    tracing::info!(port, "metrics endpoint listening");
    Ok(())
}
