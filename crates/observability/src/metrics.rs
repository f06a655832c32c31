//! Pipeline metrics
//!
//! Thin wrappers around the `metrics` facade so every crate records under
//! the same names, plus in-memory online statistics for run summaries.

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Record one Run pass of the executor
pub fn record_tick(tick: u64, time: f64) {
    counter!("pony_ins_ticks_total").increment(1);
    gauge!("pony_ins_last_tick").set(tick as f64);
    gauge!("pony_ins_bus_time_seconds").set(time);
}

/// Record one plugin invocation
pub fn record_plugin_invocation(plugin: &str, phase: &str, elapsed: Duration) {
    histogram!(
        "pony_ins_plugin_invocation_us",
        "plugin" => plugin.to_string(),
        "phase" => phase.to_string()
    )
    .record(elapsed.as_secs_f64() * 1e6);
}

/// Record a sensor record consumed by the ingest plugin
pub fn record_sensor_record(valid: bool) {
    let status = if valid { "valid" } else { "malformed" };
    counter!("pony_ins_records_total", "status" => status).increment(1);
    if !valid {
        counter!("pony_ins_records_malformed_total").increment(1);
    }
}

/// Record a navigation line written
pub fn record_output_line(sink: &str) {
    counter!("pony_ins_output_lines_total", "sink" => sink.to_string()).increment(1);
}

/// Record a termination request
pub fn record_termination(plugin: &str, kind: &str) {
    counter!(
        "pony_ins_terminations_total",
        "plugin" => plugin.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_summary_display() {
        assert_eq!(StatsSummary::default().to_string(), "N/A");

        let mut stats = RunningStats::default();
        stats.push(2.0);
        let output = stats.summary().to_string();
        assert!(output.contains("mean=2.000"));
        assert!(output.contains("(n=1)"));
    }

    #[test]
    fn test_recorders_without_exporter() {
        // No recorder installed: calls are no-ops
        record_tick(1, 0.0025);
        record_plugin_invocation("time_sync", "run", Duration::from_micros(3));
        record_sensor_record(false);
        record_output_line("nav");
        record_termination("sensor_ingest", "end_of_input");
    }
}
