//! Configuration Defaults Integration Tests
//!
//! Set/get/reset behavior of the defaults registry, settings-driven defaults and the
//! process-wide factory surface.

mod common;

use common::*;
use lambda_runner::config::{ConfigRegistry, RunnerConfig, RunnerConfigOverrides, RunnerSettings};
use lambda_runner::test_utils::RecordingContext;
use lambda_runner::RunnerFactory;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_reset_after_any_sequence_of_sets_restores_baseline() {
    let factory = RunnerFactory::isolated();
    factory.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("One: "));
    factory.set_defaults(
        &RunnerConfigOverrides::new()
            .with_not_found_message("Gone")
            .with_debug(true),
    );
    factory.reset_defaults();

    assert_eq!(factory.get_defaults(), RunnerConfig::baseline());
}

#[test]
fn test_set_defaults_keeps_unspecified_fields() {
    let factory = RunnerFactory::isolated();
    factory.set_defaults(&RunnerConfigOverrides::new().with_default_message("Oops"));
    factory.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("E: "));

    let defaults = factory.get_defaults();
    assert_eq!(defaults.default_message, "Oops");
    assert_eq!(defaults.error_prefix, "E: ");
    assert_eq!(defaults.not_found_message, "Not found: could not find resource");
    assert!(!defaults.debug);
}

#[test]
fn test_factories_sharing_a_registry_share_defaults() {
    let registry = Arc::new(ConfigRegistry::new());
    let first = RunnerFactory::new(Arc::clone(&registry));
    let second = RunnerFactory::new(Arc::clone(&registry));

    first.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Shared: "));

    assert_eq!(second.get_defaults().error_prefix, "Shared: ");
    assert!(Arc::ptr_eq(first.registry(), second.registry()));
}

#[tokio::test]
async fn test_settings_file_drives_factory_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("runner.yaml");
    fs::write(
        &path,
        "error_prefix: \"Service error: \"\nnot_found_pattern: \"^Error: Missing\"\n",
    )
    .unwrap();

    let overrides = RunnerSettings::load_from(
        Some(&path),
        config::Environment::with_prefix("LAMBDA_RUNNER").source(Some(Default::default())),
    )
    .unwrap()
    .into_overrides()
    .unwrap();

    let factory = RunnerFactory::isolated();
    factory.set_defaults(&overrides);

    let generic = Arc::new(RecordingContext::new());
    factory
        .wrap(lambda_fail())
        .invoke(json!({}), generic.clone(), None)
        .await;
    assert_eq!(generic.fail_calls(), vec!["Service error: Error".to_string()]);

    let missing = Arc::new(RecordingContext::new());
    factory
        .wrap(lambda_fail_with(lambda_runner::HandlerError::new("Missing row 4")))
        .invoke(json!({}), missing.clone(), None)
        .await;
    assert_eq!(missing.fail_calls(), vec!["Missing row 4".to_string()]);
}

#[tokio::test]
async fn test_global_factory_round_trip() {
    // The only test in this binary that touches the process-wide registry
    let factory = RunnerFactory::global();
    factory.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Global: "));

    let context = Arc::new(RecordingContext::new());
    RunnerFactory::default()
        .wrap(lambda_fail())
        .invoke(json!({}), context.clone(), None)
        .await;

    factory.reset_defaults();

    assert_eq!(context.fail_calls(), vec!["Global: Error".to_string()]);
    assert_eq!(ConfigRegistry::global().defaults(), RunnerConfig::baseline());
}
