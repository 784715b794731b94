//! Error types for the recurrence kernel.
//!
//! Only genuinely bad input is an error. A signal that is too short for the
//! requested embedding produces an empty value instead, so callers must check
//! `is_empty()` on trajectories and matrices rather than matching on errors.

use thiserror::Error;

/// Errors raised by the kernel, the pipeline and the configuration layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecurrenceError {
    /// A parameter is outside its valid domain. Values are never clamped.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the offending parameter as the caller knows it.
        name: &'static str,
        message: String,
    },

    /// A generator name that is not part of the catalog.
    #[error("unknown signal kind: {0}")]
    UnknownSignalKind(String),

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl RecurrenceError {
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RecurrenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
