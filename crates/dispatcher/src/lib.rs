//! # Dispatcher
//!
//! Navigation output module.
//!
//! Responsibilities:
//! - Write the navigation solution to a fixed-width text file, one line per tick
//! - Report progress (seconds into navigation) on the console
//! - Never modify the bus beyond requesting a fatal termination on I/O failure

pub mod error;
pub mod format;
pub mod sinks;

pub use error::DispatcherError;
pub use format::{fixed, format_record, parse_record, COLUMNS, HEADER};
pub use sinks::{OutputWriter, ProgressReporter};
