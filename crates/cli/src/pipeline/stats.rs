//! Pipeline statistics.

use std::time::Duration;

use contracts::Termination;
use executor::{ExecutionReport, PluginReport};
use ingestion::MetricsSnapshot;
use serde::Serialize;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Ticks that completed without a termination request
    pub ticks: u64,

    /// Navigation time reached (s)
    pub final_time: f64,

    /// Why the run ended
    pub termination: Option<Termination>,

    /// Sensor records turned into fresh data
    pub records_valid: u64,

    /// Sensor records skipped as malformed
    pub records_malformed: u64,

    /// Wall-clock duration of the run
    #[serde(serialize_with = "as_secs")]
    pub duration: Duration,

    pub plugins: Vec<PluginReport>,
}

fn as_secs<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl PipelineStats {
    pub fn new(report: ExecutionReport, records: MetricsSnapshot, duration: Duration) -> Self {
        Self {
            ticks: report.ticks,
            final_time: report.final_time,
            termination: report.termination,
            records_valid: records.records_valid,
            records_malformed: records.records_malformed,
            duration,
            plugins: report.plugins,
        }
    }

    /// No fatal termination recorded
    pub fn is_success(&self) -> bool {
        !self.termination.as_ref().is_some_and(Termination::is_error)
    }

    /// Ticks per wall-clock second
    pub fn ticks_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===\n");
        println!("  Ticks:            {}", self.ticks);
        println!("  Navigation time:  {:.5} s", self.final_time);
        println!("  Wall time:        {:.3} s", self.duration.as_secs_f64());
        println!("  Ticks/s:          {:.0}", self.ticks_per_second());
        println!("  Records:          {}", self.records_valid);
        println!("  Malformed:        {}", self.records_malformed);
        if let Some(termination) = &self.termination {
            println!("  Ended by:         {termination}");
        }

        println!("\n  Plugins:");
        for plugin in &self.plugins {
            println!(
                "    - {:<18} run {:>8}  mean {:>8.2} us  max {:>8.2} us",
                plugin.name, plugin.run_calls, plugin.mean_latency_us, plugin.max_latency_us
            );
        }
        println!();
    }
}
