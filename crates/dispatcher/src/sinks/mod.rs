//! Output plugins

mod output;
mod progress;

pub use output::OutputWriter;
pub use progress::{ProgressReporter, DEFAULT_INTERVAL};
