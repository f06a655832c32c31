//! # Executor
//!
//! Pipeline scheduler.
//!
//! Responsibilities:
//! - Hold the ordered plugin list and the one bus instance
//! - Drive Init once, Run once per tick, Terminate exactly once
//! - Stop a pass at the first termination request and guarantee every
//!   plugin one Terminate invocation afterwards
//!
//! ## Usage
//!
//! ```ignore
//! let mut executor = Executor::new();
//! if !executor.register(TimeSync::new()) || !executor.register(SensorIngest::new()) {
//!     anyhow::bail!("ERROR on initialization");
//! }
//! if executor.initialize(configuration) {
//!     while executor.tick() {}
//! }
//! ```

mod executor;
mod report;
mod stop;

pub use executor::{Executor, DEFAULT_PLUGIN_CAPACITY};
pub use report::{ExecutionReport, PluginReport};
pub use stop::StopCondition;
