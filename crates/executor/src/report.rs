//! Execution report - summary of a pipeline run

use contracts::Termination;
use serde::Serialize;

/// Per-plugin invocation summary
#[derive(Debug, Clone, Serialize)]
pub struct PluginReport {
    pub name: String,
    pub init_calls: u64,
    pub run_calls: u64,
    pub terminate_calls: u64,
    /// Mean invocation latency (µs)
    pub mean_latency_us: f64,
    /// Worst invocation latency (µs)
    pub max_latency_us: f64,
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    /// Run passes that finished without a termination request
    pub ticks: u64,
    /// Bus time after the last pass (s)
    pub final_time: f64,
    /// Why the pipeline stopped (None while still running)
    pub termination: Option<Termination>,
    pub plugins: Vec<PluginReport>,
}

impl ExecutionReport {
    /// No fatal termination recorded
    pub fn is_success(&self) -> bool {
        !self
            .termination
            .as_ref()
            .is_some_and(Termination::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_depends_on_termination_kind() {
        let mut report = ExecutionReport {
            ticks: 3,
            final_time: 0.01,
            termination: Some(Termination::end_of_input("sensor_ingest")),
            plugins: Vec::new(),
        };
        assert!(report.is_success());

        report.termination = Some(Termination::fatal("output_writer", "disk full"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_report_serializes() {
        let report = ExecutionReport {
            ticks: 1,
            final_time: 0.0025,
            termination: Some(Termination::stopped("stop_condition", "tick limit")),
            plugins: vec![PluginReport {
                name: "time_sync".into(),
                init_calls: 1,
                run_calls: 2,
                terminate_calls: 1,
                mean_latency_us: 0.5,
                max_latency_us: 1.0,
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"stopped\""));
        assert!(json.contains("\"time_sync\""));
    }
}
