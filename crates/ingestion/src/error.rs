//! Ingestion error types

use std::path::PathBuf;

use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// `sensors_in` missing from the configuration
    #[error("input file not configured (expected '{key} = <file>')")]
    InputNotConfigured {
        /// Configuration key
        key: &'static str,
    },

    /// Input file could not be opened
    #[error("cannot open input file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failure after the file was opened
    #[error("read error at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// Record with fewer than six numeric fields
    #[error("malformed record at line {line}: {parsed} of {expected} fields parsed")]
    MalformedRecord {
        line: u64,
        parsed: usize,
        expected: usize,
    },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
