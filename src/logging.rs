//! # Structured Logging Module
//!
//! Environment-aware structured logging for runner invocations, plus the helpers the
//! runner uses to emit invocation and error records.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// The level comes from `LAMBDA_RUNNER_ENV` (falling back to `APP_ENV`); `RUST_LOG` wins
/// over it. Set `LAMBDA_RUNNER_LOG_FORMAT=json` for JSON lines instead of human-readable
/// output.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let lookup = |key: &str| std::env::var(key).ok();
        let environment = environment_from(lookup);
        let log_level = get_log_level(&environment);
        let json = log_format_from(lookup) == "json";

        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level))
        };

        let subscriber = tracing_subscriber::registry()
            .with((!json).then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_filter(filter())
            }))
            .with(json.then(|| {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_filter(filter())
            }));

        // An embedding runtime may already own the global subscriber
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Resolve the environment name through `lookup`
fn environment_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("LAMBDA_RUNNER_ENV")
        .or_else(|| lookup("APP_ENV"))
        .unwrap_or_else(|| "development".to_string())
}

fn log_format_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("LAMBDA_RUNNER_LOG_FORMAT").unwrap_or_else(|| "text".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log the completion of one invocation
pub fn log_invocation(
    invocation_id: &str,
    request_id: Option<&str>,
    handler: &str,
    status: &str,
    duration_ms: u64,
    details: Option<&str>,
) {
    tracing::info!(
        invocation_id = %invocation_id,
        request_id = request_id,
        handler = %handler,
        status = %status,
        duration_ms = duration_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "INVOCATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
