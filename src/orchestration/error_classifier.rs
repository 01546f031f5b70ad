//! # Error Classification
//!
//! Turns a raw [`HandlerError`] into the message the runtime's failure primitive
//! receives, and into an [`ErrorCategory`].
//!
//! ## Rules
//!
//! - **NotFound**: the error is non-empty and the configured pattern matches its string
//!   form. The message is the error's own message, else its string form, else the
//!   configured not-found message. Never prefixed.
//! - **Generic**: everything else, including empty errors. The message is the
//!   configured prefix followed by the error's own message, else the default message.
//!
//! ```rust
//! use lambda_runner::config::RunnerConfig;
//! use lambda_runner::orchestration::error_classifier::format_error_message;
//! use lambda_runner::HandlerError;
//!
//! let config = RunnerConfig::baseline();
//! let not_found = HandlerError::new("Not found: couldnt find it");
//! assert_eq!(format_error_message(&not_found, &config), "Not found: couldnt find it");
//! assert_eq!(format_error_message(&HandlerError::new("Error"), &config), "Error: Error");
//! ```

use crate::config::RunnerConfig;
use crate::error::HandlerError;
use serde::{Deserialize, Serialize};

/// Failure categories a raw error can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// String form matched the not-found pattern
    NotFound,

    /// Any other failure
    Generic,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::NotFound => write!(f, "Not Found"),
            ErrorCategory::Generic => write!(f, "Generic"),
        }
    }
}

/// Category plus formatted message for one raw error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub category: ErrorCategory,
    pub message: String,
}

/// Category of `error` under `config`
pub fn classify_error(error: &HandlerError, config: &RunnerConfig) -> ErrorCategory {
    if !error.is_empty() && config.not_found_pattern.is_match(&error.to_string()) {
        ErrorCategory::NotFound
    } else {
        ErrorCategory::Generic
    }
}

/// Category and formatted message of `error` under `config`
pub fn classify(error: &HandlerError, config: &RunnerConfig) -> ErrorClassification {
    let category = classify_error(error, config);

    let message = match category {
        ErrorCategory::NotFound => match error.message() {
            Some(message) => message.to_string(),
            None => {
                let string_form = error.to_string();
                if string_form.is_empty() {
                    config.not_found_message.clone()
                } else {
                    string_form
                }
            }
        },
        ErrorCategory::Generic => format!(
            "{}{}",
            config.error_prefix,
            error.message().unwrap_or(&config.default_message)
        ),
    };

    ErrorClassification { category, message }
}

/// The message handed to the runtime's failure primitive
pub fn format_error_message(error: &HandlerError, config: &RunnerConfig) -> String {
    classify(error, config).message
}
