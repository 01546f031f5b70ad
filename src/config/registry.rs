//! # Configuration Registry
//!
//! Holds the defaults every new runner inherits. A registry is an ordinary value:
//! tests build their own and never need to reset shared state. A lazily created
//! process-wide instance is available through [`ConfigRegistry::global`].
//!
//! Writes are expected at startup or in tests. Runners snapshot their merged
//! configuration when created and never read the registry again.

use super::{RunnerConfig, RunnerConfigOverrides};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static GLOBAL_REGISTRY: OnceLock<Arc<ConfigRegistry>> = OnceLock::new();

/// Mutable defaults with set/get/reset semantics
#[derive(Debug)]
pub struct ConfigRegistry {
    baseline: RunnerConfig,
    current: RwLock<RunnerConfig>,
}

impl ConfigRegistry {
    /// Registry starting from [`RunnerConfig::baseline`]
    pub fn new() -> Self {
        Self::with_baseline(RunnerConfig::baseline())
    }

    /// Registry whose baseline (and reset target) is `baseline`
    pub fn with_baseline(baseline: RunnerConfig) -> Self {
        Self {
            current: RwLock::new(baseline.clone()),
            baseline,
        }
    }

    /// The process-wide registry
    pub fn global() -> Arc<ConfigRegistry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(ConfigRegistry::new())))
    }

    /// Snapshot of the current defaults
    pub fn defaults(&self) -> RunnerConfig {
        self.current.read().clone()
    }

    /// The configuration `reset_defaults` restores
    pub fn baseline(&self) -> &RunnerConfig {
        &self.baseline
    }

    /// Shallow-merge `overrides` into the current defaults
    pub fn set_defaults(&self, overrides: &RunnerConfigOverrides) {
        let mut current = self.current.write();
        let merged = overrides.merge(&current);
        *current = merged;
        debug!(overrides = ?overrides, "Runner defaults updated");
    }

    /// Discard every `set_defaults` call made so far
    pub fn reset_defaults(&self) {
        *self.current.write() = self.baseline.clone();
        debug!("Runner defaults reset to baseline");
    }

    /// Current defaults merged with `overrides`; the snapshot a runner captures
    pub fn merge_with_overrides(&self, overrides: &RunnerConfigOverrides) -> RunnerConfig {
        overrides.merge(&self.current.read())
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_defaults_merges_into_current() {
        let registry = ConfigRegistry::new();
        registry.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("A: "));
        registry.set_defaults(&RunnerConfigOverrides::new().with_default_message("Broken"));

        let defaults = registry.defaults();
        assert_eq!(defaults.error_prefix, "A: ");
        assert_eq!(defaults.default_message, "Broken");
        assert_eq!(defaults.not_found_message, RunnerConfig::baseline().not_found_message);
    }

    #[test]
    fn test_reset_restores_baseline() {
        let registry = ConfigRegistry::new();
        registry.set_defaults(
            &RunnerConfigOverrides::new()
                .with_error_prefix("A: ")
                .with_debug(true),
        );
        registry.reset_defaults();

        assert_eq!(registry.defaults(), RunnerConfig::baseline());
        assert_eq!(&registry.defaults(), registry.baseline());
    }

    #[test]
    fn test_custom_baseline_is_the_reset_target() {
        let baseline = RunnerConfigOverrides::new()
            .with_error_prefix("Custom: ")
            .merge(&RunnerConfig::baseline());
        let registry = ConfigRegistry::with_baseline(baseline.clone());

        registry.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Other: "));
        registry.reset_defaults();

        assert_eq!(registry.defaults(), baseline);
    }

    #[test]
    fn test_merge_snapshot_is_detached_from_later_writes() {
        let registry = ConfigRegistry::new();
        let snapshot = registry.merge_with_overrides(&RunnerConfigOverrides::new());

        registry.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Later: "));

        assert_eq!(snapshot.error_prefix, "Error: ");
        assert_eq!(registry.defaults().error_prefix, "Later: ");
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(Arc::ptr_eq(&ConfigRegistry::global(), &ConfigRegistry::global()));
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = ConfigRegistry::new();
        let second = ConfigRegistry::new();
        first.set_defaults(&RunnerConfigOverrides::new().with_debug(true));

        assert!(first.defaults().debug);
        assert!(!second.defaults().debug);
    }
}
