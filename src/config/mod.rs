//! # Runner Configuration
//!
//! Configuration shared by every runner a factory creates.
//!
//! ## Architecture
//!
//! - **RunnerConfig**: Fully populated configuration captured by a runner at creation
//! - **RunnerConfigOverrides**: Partial configuration; `None` fields inherit
//! - **ConfigRegistry**: Mutable defaults with set/get/reset semantics
//! - **RunnerSettings**: File and environment sourced overrides (hooks excluded)
//!
//! Merging is shallow: each `Some` field in the overrides replaces the corresponding
//! default field, every other field is inherited as-is.
//!
//! ## Usage
//!
//! ```rust
//! use lambda_runner::config::{ConfigRegistry, RunnerConfigOverrides};
//!
//! let registry = ConfigRegistry::new();
//! registry.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Oops: "));
//!
//! let config = registry.merge_with_overrides(&RunnerConfigOverrides::new().with_debug(true));
//! assert_eq!(config.error_prefix, "Oops: ");
//! assert!(config.debug);
//!
//! registry.reset_defaults();
//! assert_eq!(registry.defaults().error_prefix, "Error: ");
//! ```

pub mod loader;
pub mod registry;

use crate::error::{Result, RunnerError};
use crate::hooks::{
    ErrorHook, ErrorPayload, InitHook, InitPayload, LifecycleHook, NoopHook, SuccessHook,
    SuccessPayload,
};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

pub use loader::RunnerSettings;
pub use registry::ConfigRegistry;

pub const DEFAULT_ERROR_PREFIX: &str = "Error: ";
pub const DEFAULT_NOT_FOUND_PATTERN: &str = "Not found:";
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Not found: could not find resource";
pub const DEFAULT_MESSAGE: &str = "Internal Error";

/// Compile a not-found pattern, reporting the offending source on failure
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| RunnerError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn default_pattern() -> Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(DEFAULT_NOT_FOUND_PATTERN).expect("baseline pattern compiles"))
        .clone()
}

// Baseline hooks share one allocation so identity comparison holds across baselines
fn noop_hook() -> Arc<NoopHook> {
    static NOOP: OnceLock<Arc<NoopHook>> = OnceLock::new();
    Arc::clone(NOOP.get_or_init(|| Arc::new(NoopHook)))
}

/// Fully populated runner configuration
#[derive(Clone)]
pub struct RunnerConfig {
    /// Prefix prepended to generic failure messages
    pub error_prefix: String,

    /// Searched for in an error's string form to detect not-found failures
    pub not_found_pattern: Regex,

    /// Fallback message for not-found failures with no usable text
    pub not_found_message: String,

    /// Fallback message for generic failures without a message
    pub default_message: String,

    pub on_init: InitHook,
    pub on_success: SuccessHook,
    pub on_error: ErrorHook,

    /// Log swallowed on_error hook failures
    pub debug: bool,
}

impl RunnerConfig {
    /// The fixed baseline every registry starts from
    pub fn baseline() -> Self {
        Self {
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
            not_found_pattern: default_pattern(),
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE.to_string(),
            default_message: DEFAULT_MESSAGE.to_string(),
            on_init: noop_hook(),
            on_success: noop_hook(),
            on_error: noop_hook(),
            debug: false,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("error_prefix", &self.error_prefix)
            .field("not_found_pattern", &self.not_found_pattern.as_str())
            .field("not_found_message", &self.not_found_message)
            .field("default_message", &self.default_message)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Hooks compare by identity, patterns by source text
impl PartialEq for RunnerConfig {
    fn eq(&self, other: &Self) -> bool {
        self.error_prefix == other.error_prefix
            && self.not_found_pattern.as_str() == other.not_found_pattern.as_str()
            && self.not_found_message == other.not_found_message
            && self.default_message == other.default_message
            && Arc::ptr_eq(&self.on_init, &other.on_init)
            && Arc::ptr_eq(&self.on_success, &other.on_success)
            && Arc::ptr_eq(&self.on_error, &other.on_error)
            && self.debug == other.debug
    }
}

/// Partial configuration applied over a set of defaults
#[derive(Clone, Default)]
pub struct RunnerConfigOverrides {
    pub error_prefix: Option<String>,
    pub not_found_pattern: Option<Regex>,
    pub not_found_message: Option<String>,
    pub default_message: Option<String>,
    pub on_init: Option<InitHook>,
    pub on_success: Option<SuccessHook>,
    pub on_error: Option<ErrorHook>,
    pub debug: Option<bool>,
}

impl RunnerConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.error_prefix = Some(prefix.into());
        self
    }

    pub fn with_not_found_pattern(mut self, pattern: Regex) -> Self {
        self.not_found_pattern = Some(pattern);
        self
    }

    /// Compile `pattern` and use it as the not-found pattern
    pub fn try_with_not_found_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.with_not_found_pattern(compile_pattern(pattern)?))
    }

    pub fn with_not_found_message(mut self, message: impl Into<String>) -> Self {
        self.not_found_message = Some(message.into());
        self
    }

    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    pub fn with_on_init(mut self, hook: impl LifecycleHook<InitPayload> + 'static) -> Self {
        self.on_init = Some(Arc::new(hook));
        self
    }

    pub fn with_on_success(mut self, hook: impl LifecycleHook<SuccessPayload> + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    pub fn with_on_error(mut self, hook: impl LifecycleHook<ErrorPayload> + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// True when no field is overridden
    pub fn is_empty(&self) -> bool {
        self.error_prefix.is_none()
            && self.not_found_pattern.is_none()
            && self.not_found_message.is_none()
            && self.default_message.is_none()
            && self.on_init.is_none()
            && self.on_success.is_none()
            && self.on_error.is_none()
            && self.debug.is_none()
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn combine(self, other: RunnerConfigOverrides) -> Self {
        Self {
            error_prefix: other.error_prefix.or(self.error_prefix),
            not_found_pattern: other.not_found_pattern.or(self.not_found_pattern),
            not_found_message: other.not_found_message.or(self.not_found_message),
            default_message: other.default_message.or(self.default_message),
            on_init: other.on_init.or(self.on_init),
            on_success: other.on_success.or(self.on_success),
            on_error: other.on_error.or(self.on_error),
            debug: other.debug.or(self.debug),
        }
    }

    /// Shallow merge over `base`, producing a new configuration
    pub fn merge(&self, base: &RunnerConfig) -> RunnerConfig {
        RunnerConfig {
            error_prefix: self
                .error_prefix
                .clone()
                .unwrap_or_else(|| base.error_prefix.clone()),
            not_found_pattern: self
                .not_found_pattern
                .clone()
                .unwrap_or_else(|| base.not_found_pattern.clone()),
            not_found_message: self
                .not_found_message
                .clone()
                .unwrap_or_else(|| base.not_found_message.clone()),
            default_message: self
                .default_message
                .clone()
                .unwrap_or_else(|| base.default_message.clone()),
            on_init: self
                .on_init
                .clone()
                .unwrap_or_else(|| Arc::clone(&base.on_init)),
            on_success: self
                .on_success
                .clone()
                .unwrap_or_else(|| Arc::clone(&base.on_success)),
            on_error: self
                .on_error
                .clone()
                .unwrap_or_else(|| Arc::clone(&base.on_error)),
            debug: self.debug.unwrap_or(base.debug),
        }
    }
}

impl fmt::Debug for RunnerConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfigOverrides")
            .field("error_prefix", &self.error_prefix)
            .field(
                "not_found_pattern",
                &self.not_found_pattern.as_ref().map(Regex::as_str),
            )
            .field("not_found_message", &self.not_found_message)
            .field("default_message", &self.default_message)
            .field("on_init", &self.on_init.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}
