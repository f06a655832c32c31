//! Termination - why the pipeline left the Run phase

use serde::Serialize;

/// Reason attached to a termination request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Input source exhausted (graceful, not an error)
    EndOfInput { plugin: String },

    /// Explicit stop request (signal, tick limit)
    Stopped { plugin: String, reason: String },

    /// Unrecoverable failure reported by a plugin
    Fatal { plugin: String, message: String },
}

impl Termination {
    pub fn end_of_input(plugin: impl Into<String>) -> Self {
        Self::EndOfInput {
            plugin: plugin.into(),
        }
    }

    pub fn stopped(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Stopped {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    pub fn fatal(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fatal {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Plugin that requested termination
    pub fn plugin(&self) -> &str {
        match self {
            Self::EndOfInput { plugin }
            | Self::Stopped { plugin, .. }
            | Self::Fatal { plugin, .. } => plugin,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfInput { plugin } => write!(f, "end of input ({plugin})"),
            Self::Stopped { plugin, reason } => write!(f, "stopped by {plugin}: {reason}"),
            Self::Fatal { plugin, message } => write!(f, "fatal error in {plugin}: {message}"),
        }
    }
}
