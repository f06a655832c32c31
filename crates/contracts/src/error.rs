//! Layered error definitions
//!
//! Categorized by source: config / registration / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Registration Errors =====
    /// Plugin list is full
    #[error("cannot register plugin '{plugin}': capacity of {capacity} plugins exceeded")]
    RegistrationCapacity { plugin: String, capacity: usize },

    /// Registration attempted after the Init phase started
    #[error("cannot register plugin '{plugin}': registration is closed")]
    RegistrationClosed { plugin: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create registration capacity error
    pub fn registration_capacity(plugin: impl Into<String>, capacity: usize) -> Self {
        Self::RegistrationCapacity {
            plugin: plugin.into(),
            capacity,
        }
    }
}
