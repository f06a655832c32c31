//! Pipeline orchestrator - registers the plugins and drives the executor.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::Configuration;
use dispatcher::{OutputWriter, ProgressReporter};
use executor::{Executor, StopCondition};
use ingestion::SensorIngest;
use navigation::InitialSolution;
use time_sync::TimeSync;
use tracing::{info, warn};

use super::PipelineStats;
use crate::error::CliError;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Configuration blob handed to the bus
    pub configuration: Configuration,

    /// Sensor input override (None = `sensors_in`)
    pub input: Option<PathBuf>,

    /// Navigation output override (None = `out`)
    pub output: Option<PathBuf>,

    /// Maximum number of ticks (None = until end of input)
    pub max_ticks: Option<u64>,

    /// Print progress to stdout
    pub progress: bool,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

impl PipelineConfig {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            input: None,
            output: None,
            max_ticks: None,
            progress: false,
            metrics_port: None,
        }
    }
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion on a blocking thread.
    ///
    /// Raising `stop` ends the run after the current tick; the terminate
    /// pass still runs.
    pub async fn run(self, stop: Arc<AtomicBool>) -> Result<PipelineStats> {
        if let Some(port) = self.config.metrics_port {
            observability::install_exporter(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        let stats = tokio::task::spawn_blocking(move || self.run_blocking(stop))
            .await
            .context("pipeline thread panicked")??;
        Ok(stats)
    }

    /// Run the pipeline on the calling thread
    pub fn run_blocking(self, stop: Arc<AtomicBool>) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let config = self.config;

        let ingest = match config.input {
            Some(path) => SensorIngest::with_input(path),
            None => SensorIngest::new(),
        };
        let ingest_metrics = ingest.metrics();

        let output = match config.output {
            Some(path) => OutputWriter::with_path(path),
            None => OutputWriter::new(),
        };

        let mut stop_condition = StopCondition::new().with_flag(stop);
        if let Some(max_ticks) = config.max_ticks {
            stop_condition = stop_condition.with_max_ticks(max_ticks);
        }

        let mut executor = Executor::new();
        let mut registered = executor.register(stop_condition)
            && executor.register(TimeSync::new())
            && executor.register(ingest)
            && executor.register(InitialSolution::new())
            && executor.register(output);
        if config.progress {
            registered = registered && executor.register(ProgressReporter::new());
        }
        if !registered {
            return Err(CliError::registration("plugin list full or closed").into());
        }

        info!(plugins = ?executor.plugin_names(), "plugins registered");

        if !executor.initialize(config.configuration) {
            let reason = describe(executor.report().termination.as_ref());
            return Err(CliError::initialization(reason).into());
        }

        while executor.tick() {}

        let report = executor.report();
        let stats = PipelineStats::new(report, ingest_metrics.snapshot(), start_time.elapsed());

        if !stats.is_success() {
            return Err(CliError::execution(describe(stats.termination.as_ref())).into());
        }
        if stats.records_malformed > 0 {
            warn!(
                malformed = stats.records_malformed,
                "malformed sensor records were skipped"
            );
        }
        Ok(stats)
    }
}

fn describe(termination: Option<&contracts::Termination>) -> String {
    termination.map_or_else(|| "unknown reason".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &std::path::Path, records: usize) {
        let mut file = fs::File::create(path).unwrap();
        writeln!(file, "wx wy wz fx fy fz").unwrap();
        for _ in 0..records {
            writeln!(file, "0.1 -0.2 0.3 0.0 0.0 9.81").unwrap();
        }
    }

    #[test]
    fn test_run_until_end_of_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("imu.txt");
        let output = dir.path().join("ins.nav");
        write_input(&input, 5);

        let mut config = PipelineConfig::new(config_loader::ConfigLoader::sample());
        config.input = Some(input);
        config.output = Some(output.clone());

        let stats = Pipeline::new(config)
            .run_blocking(Arc::new(AtomicBool::new(false)))
            .unwrap();
        assert_eq!(stats.ticks, 5);
        assert_eq!(stats.records_valid, 5);
        assert_eq!(fs::read_to_string(output).unwrap().lines().count(), 6);
    }

    #[test]
    fn test_max_ticks() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("imu.txt");
        write_input(&input, 50);

        let mut config = PipelineConfig::new(config_loader::ConfigLoader::sample());
        config.input = Some(input);
        config.output = Some(dir.path().join("ins.nav"));
        config.max_ticks = Some(10);

        let stats = Pipeline::new(config)
            .run_blocking(Arc::new(AtomicBool::new(false)))
            .unwrap();
        assert_eq!(stats.ticks, 10);
        assert!(stats.is_success());
    }

    #[test]
    fn test_missing_input_fails_initialization() {
        let dir = tempdir().unwrap();
        let mut config = PipelineConfig::new(config_loader::ConfigLoader::sample());
        config.input = Some(dir.path().join("absent.txt"));
        config.output = Some(dir.path().join("ins.nav"));

        let err = Pipeline::new(config)
            .run_blocking(Arc::new(AtomicBool::new(false)))
            .unwrap_err();
        let err = err.downcast::<CliError>().unwrap();
        assert!(matches!(err, CliError::Initialization { .. }));
    }
}
