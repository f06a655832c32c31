//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("failed to load configuration from {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: contracts::ContractError,
    },

    /// Plugin list could not be built
    #[error("ERROR on initialization: {message}")]
    Registration { message: String },

    /// A plugin failed during Init
    #[error("initialization failed: {reason}")]
    Initialization { reason: String },

    /// A plugin failed while running
    #[error("pipeline execution failed: {reason}")]
    Execution { reason: String },
}

impl CliError {
    pub fn config(path: impl Into<PathBuf>, source: contracts::ContractError) -> Self {
        Self::Config {
            path: path.into(),
            source,
        }
    }

    pub fn registration(message: impl Into<String>) -> Self {
        Self::Registration {
            message: message.into(),
        }
    }

    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}
