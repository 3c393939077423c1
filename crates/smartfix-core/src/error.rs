//! Error types for the SmartFix triage core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the SmartFix crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Note that an unusable oracle
/// reply is *not* an error: it is normalized into `Verdict::Malformed` by the
/// parser and handled by the session controller as a terminal outcome.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SmartfixError {
    /// The oracle could not be reached, timed out, or replied with a
    /// non-success HTTP status. The round did not happen; session state is
    /// unchanged and the caller may retry the same answer.
    #[error("Oracle transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A session operation was invoked in a phase that does not permit it
    /// (e.g. answering after termination).
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    /// Configuration error (missing endpoint, bad timeout value, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error on an outgoing payload
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl SmartfixError {
    /// Creates a Transport error without an HTTP status (connect/timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the HTTP status code.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Transport error (the only retryable category)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

impl From<serde_json::Error> for SmartfixError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A type alias for `Result<T, SmartfixError>`.
pub type Result<T> = std::result::Result<T, SmartfixError>;
