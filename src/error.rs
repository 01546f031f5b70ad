//! # Error Types
//!
//! Two error families live here. [`HandlerError`] is the raw failure produced by a
//! business handler or a lifecycle hook; it is an invocation outcome, not a crate error.
//! [`RunnerError`] covers failures of the crate itself, such as an invalid not-found
//! pattern or unreadable settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw failure raised by a handler or hook.
///
/// The variants model the shapes a rejection can take: nothing at all, a bare value
/// without a message, or a structured error with a name and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum HandlerError {
    /// Rejection that carried no value
    Empty,

    /// Bare value with no message of its own; its string form is the value itself
    Value(String),

    /// Structured error with a name (e.g. `Error`, `TypeError`) and a message
    Error { name: String, message: String },
}

impl HandlerError {
    /// Structured error named `Error`
    pub fn new(message: impl Into<String>) -> Self {
        Self::Error {
            name: "Error".to_string(),
            message: message.into(),
        }
    }

    /// Structured error with a custom name
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Convert any standard error, using its `Display` output as the message
    pub fn from_std(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(error.to_string())
    }

    /// The error's own message, if it has a non-empty one
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// True when the rejection carries nothing usable
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Value(value) => value.is_empty(),
            Self::Error { .. } => false,
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Value(value) => f.write_str(value),
            Self::Error { name, message } if message.is_empty() => f.write_str(name),
            Self::Error { name, message } => write!(f, "{name}: {message}"),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<&str> for HandlerError {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(error: anyhow::Error) -> Self {
        // A HandlerError that went through anyhow keeps its original shape
        match error.downcast::<HandlerError>() {
            Ok(inner) => inner,
            Err(error) => Self::new(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        Self::named("SerializationError", error.to_string())
    }
}

/// Errors raised by the crate itself while building or configuring runners
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Invalid not-found pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
