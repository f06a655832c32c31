//! StopCondition - explicit stop requests (signal flag, tick limit)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::{Bus, Plugin, Termination};
use tracing::info;

/// Requests an explicit-stop termination.
///
/// Register it first so a stop request ends the pipeline before any other
/// plugin runs in that tick.
#[derive(Debug, Default)]
pub struct StopCondition {
    flag: Option<Arc<AtomicBool>>,
    max_ticks: Option<u64>,
}

impl StopCondition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop when `flag` is raised (e.g. by a Ctrl-C handler)
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Stop after `max_ticks` complete ticks
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }
}

impl Plugin for StopCondition {
    fn name(&self) -> &str {
        "stop_condition"
    }

    fn invoke(&mut self, bus: &mut Bus) {
        if !bus.mode().is_run() {
            return;
        }

        if self
            .flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            info!(tick = bus.tick(), "stop requested");
            bus.request_termination(Termination::stopped(self.name(), "stop requested"));
            return;
        }

        if let Some(max) = self.max_ticks {
            if bus.tick() > max {
                info!(max_ticks = max, "tick limit reached");
                bus.request_termination(Termination::stopped(
                    self.name(),
                    format!("tick limit {max} reached"),
                ));
            }
        }
    }
}
