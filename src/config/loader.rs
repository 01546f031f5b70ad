//! # Settings Loader
//!
//! Layered loading of the serializable part of the runner configuration. Sources, lowest
//! precedence first:
//!
//! 1. An optional settings file (format inferred from the extension: TOML, YAML, JSON, ...)
//! 2. `LAMBDA_RUNNER_*` environment variables (`LAMBDA_RUNNER_ERROR_PREFIX`,
//!    `LAMBDA_RUNNER_NOT_FOUND_PATTERN`, `LAMBDA_RUNNER_NOT_FOUND_MESSAGE`,
//!    `LAMBDA_RUNNER_DEFAULT_MESSAGE`, `LAMBDA_RUNNER_DEBUG`)
//!
//! Hooks are code-only and never come from settings. Overrides supplied in code sit above
//! both sources (see [`RunnerSettings::overlay`]).

use super::{compile_pattern, RunnerConfigOverrides};
use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "LAMBDA_RUNNER";

/// Settings-sourced overrides; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerSettings {
    pub error_prefix: Option<String>,
    /// Regular expression source, compiled by [`RunnerSettings::into_overrides`]
    pub not_found_pattern: Option<String>,
    pub not_found_message: Option<String>,
    pub default_message: Option<String>,
    pub debug: Option<bool>,
}

impl RunnerSettings {
    /// Load from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an optional file plus an explicit environment source
    pub fn load_from(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading runner settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: RunnerSettings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        debug!(settings = ?settings, "Runner settings loaded");
        Ok(settings)
    }

    /// Convert into overrides, compiling the pattern if one was given
    pub fn into_overrides(self) -> Result<RunnerConfigOverrides> {
        let not_found_pattern = self
            .not_found_pattern
            .as_deref()
            .map(compile_pattern)
            .transpose()?;

        Ok(RunnerConfigOverrides {
            error_prefix: self.error_prefix,
            not_found_pattern,
            not_found_message: self.not_found_message,
            default_message: self.default_message,
            debug: self.debug,
            ..RunnerConfigOverrides::default()
        })
    }

    /// Convert into overrides with `code` layered on top; fields set in code win
    pub fn overlay(self, code: RunnerConfigOverrides) -> Result<RunnerConfigOverrides> {
        Ok(self.into_overrides()?.combine(code))
    }
}
