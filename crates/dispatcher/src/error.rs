//! Dispatcher error types

use std::path::PathBuf;

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// `out` missing from the configuration
    #[error("output file not configured (expected '{key} = <file>')")]
    OutputNotConfigured { key: &'static str },

    /// Output file could not be created
    #[error("cannot create output file '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Write to an open sink failed
    #[error("write to '{sink}' failed: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },
}

impl DispatcherError {
    /// Create a write error
    pub fn write(sink: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            sink: sink.into(),
            source,
        }
    }
}

/// Dispatcher Result type alias
pub type Result<T> = std::result::Result<T, DispatcherError>;
