//! # Lifecycle Orchestrator
//!
//! [`RunnerFactory`] wraps a [`Handler`] into a [`Runner`]; [`Runner::invoke`] runs the
//! full lifecycle for one event:
//!
//! 1. on_init with `{request, context}`
//! 2. the handler with `(event, context)`
//! 3. on success: on_success with `{request, response}`, callback `Ok(result)`, `succeed(result)`
//! 4. on failure: classify, on_error with `{request, response: {error, formattedError}}`
//!    inside its own failure boundary, `fail(message)`, callback `Err(raw_error)`
//!
//! Every step is awaited before the next begins. A failing on_init or on_success hook
//! takes the failure path exactly like a handler error: on_init failures skip the
//! handler, on_success failures never reach `succeed`. The configuration is captured
//! when the runner is created; later registry writes do not affect it.
//!
//! ```rust
//! use lambda_runner::client::{handler_fn, SharedContext};
//! use lambda_runner::config::RunnerConfigOverrides;
//! use lambda_runner::orchestration::RunnerFactory;
//! use lambda_runner::test_utils::RecordingContext;
//! use lambda_runner::HandlerError;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let factory = RunnerFactory::isolated();
//! let runner = factory.create(
//!     handler_fn(|_event: Value, _ctx: SharedContext| async {
//!         Err::<Value, _>(HandlerError::new("Error"))
//!     }),
//!     &RunnerConfigOverrides::new().with_error_prefix("Oh, crud! "),
//! );
//!
//! let context = Arc::new(RecordingContext::new());
//! runner.invoke(json!({}), context.clone(), None).await;
//! assert_eq!(context.fail_calls(), vec!["Oh, crud! Error".to_string()]);
//! # }
//! ```

use crate::client::context::SharedContext;
use crate::client::traits::Handler;
use crate::config::{ConfigRegistry, RunnerConfig, RunnerConfigOverrides};
use crate::error::HandlerError;
use crate::hooks::{ErrorPayload, ErrorResponse, InitPayload, SuccessPayload};
use crate::logging::{log_error, log_invocation};
use crate::orchestration::error_classifier::classify;
use crate::orchestration::signaler::{CompletionCallback, CompletionSignaler, Outcome};
use crate::orchestration::state::{InvocationLifecycle, InvocationState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

struct RunnerInner {
    handler: Arc<dyn Handler>,
    config: RunnerConfig,
}

/// A wrapped handler; the invocation function handed to the runtime
///
/// Cheap to clone and safe to invoke concurrently. Invocations share no mutable state.
#[derive(Clone)]
pub struct Runner {
    inner: Arc<RunnerInner>,
}

impl Runner {
    /// Wrap `handler` with an already merged configuration
    pub fn new(handler: impl Handler + 'static, config: RunnerConfig) -> Self {
        Self::from_shared(Arc::new(handler), config)
    }

    pub fn from_shared(handler: Arc<dyn Handler>, config: RunnerConfig) -> Self {
        Self {
            inner: Arc::new(RunnerInner { handler, config }),
        }
    }

    /// Configuration captured when this runner was created
    pub fn config(&self) -> &RunnerConfig {
        &self.inner.config
    }

    pub fn handler_name(&self) -> &'static str {
        self.inner.handler.handler_name()
    }

    /// Run the full lifecycle for one event
    ///
    /// Exactly one of `context.succeed` / `context.fail` is called, and `callback`, if
    /// given, is called exactly once. The returned [`Outcome`] mirrors what was signalled.
    ///
    /// # Panics
    ///
    /// A panic in the handler or a hook is not a failure outcome. It unwinds out of
    /// `invoke` before anything is signalled, so `succeed`, `fail` and the callback are all
    /// skipped. Under [`dispatch`](Runner::dispatch) it surfaces as a panicked
    /// [`JoinHandle`] (release builds abort instead).
    pub async fn invoke(
        &self,
        event: Value,
        context: SharedContext,
        callback: Option<CompletionCallback>,
    ) -> Outcome {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            "invocation",
            invocation_id = %invocation_id,
            request_id = context.request_id(),
            handler = self.handler_name(),
        );

        self.run_lifecycle(invocation_id, event, context, callback)
            .instrument(span)
            .await
    }

    /// Start [`invoke`](Runner::invoke) on the current tokio runtime without awaiting it
    ///
    /// Completion is observed through the context primitives, the callback, or the
    /// returned handle.
    pub fn dispatch(
        &self,
        event: Value,
        context: SharedContext,
        callback: Option<CompletionCallback>,
    ) -> JoinHandle<Outcome> {
        let runner = self.clone();
        tokio::spawn(async move { runner.invoke(event, context, callback).await })
    }

    async fn run_lifecycle(
        &self,
        invocation_id: Uuid,
        event: Value,
        context: SharedContext,
        callback: Option<CompletionCallback>,
    ) -> Outcome {
        let start_time = Instant::now();
        let mut lifecycle = InvocationLifecycle::new();
        info!("Starting invocation");

        let signaler = CompletionSignaler::new(Arc::clone(&context), callback);

        let outcome = match self.execute(&event, &context, &mut lifecycle).await {
            Ok(result) => Outcome::Success(result),
            Err(error) => {
                lifecycle.transition(InvocationState::Failing);
                self.handle_failure(&event, error).await
            }
        };

        lifecycle.transition(InvocationState::NotifyingOutcome);
        signaler.signal(&outcome);
        lifecycle.transition(InvocationState::Completed);
        debug_assert!(lifecycle.state().is_terminal());

        let status = if outcome.is_success() { "succeeded" } else { "failed" };
        log_invocation(
            &invocation_id.to_string(),
            context.request_id(),
            self.handler_name(),
            status,
            start_time.elapsed().as_millis() as u64,
            outcome.failure_message(),
        );

        outcome
    }

    /// on_init, handler, on_success; the first error short-circuits
    async fn execute(
        &self,
        event: &Value,
        context: &SharedContext,
        lifecycle: &mut InvocationLifecycle,
    ) -> Result<Value, HandlerError> {
        let config = &self.inner.config;

        lifecycle.transition(InvocationState::Initializing);
        config
            .on_init
            .call(InitPayload {
                request: event.clone(),
                context: Arc::clone(context),
            })
            .await
            .inspect_err(|error| warn!(error = %error, "on_init hook failed"))?;

        lifecycle.transition(InvocationState::Invoking);
        let result = self
            .inner
            .handler
            .handle(event.clone(), Arc::clone(context))
            .await?;
        debug!("Handler resolved");

        lifecycle.transition(InvocationState::Succeeding);
        config
            .on_success
            .call(SuccessPayload {
                request: event.clone(),
                response: result.clone(),
            })
            .await
            .inspect_err(|error| warn!(error = %error, "on_success hook failed"))?;

        Ok(result)
    }

    /// Classify `error` and run on_error; hook failures never escape this boundary
    async fn handle_failure(&self, event: &Value, error: HandlerError) -> Outcome {
        let config = &self.inner.config;
        let classification = classify(&error, config);

        warn!(
            category = %classification.category,
            error = %error,
            formatted_error = %classification.message,
            "Invocation failed"
        );

        let payload = ErrorPayload {
            request: event.clone(),
            response: ErrorResponse {
                error: error.clone(),
                formatted_error: classification.message.clone(),
            },
        };

        if let Err(hook_error) = config.on_error.call(payload).await {
            if config.debug {
                log_error(
                    "runner",
                    "on_error",
                    &hook_error.to_string(),
                    Some("Failed to invoke error callback"),
                );
            }
        }

        Outcome::Failure {
            error,
            message: classification.message,
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("handler", &self.handler_name())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Creates runners from handlers, merging overrides over a registry's defaults
#[derive(Debug, Clone)]
pub struct RunnerFactory {
    registry: Arc<ConfigRegistry>,
}

impl RunnerFactory {
    pub fn new(registry: Arc<ConfigRegistry>) -> Self {
        Self { registry }
    }

    /// Factory backed by the process-wide registry
    pub fn global() -> Self {
        Self::new(ConfigRegistry::global())
    }

    /// Factory with a fresh registry of its own
    pub fn isolated() -> Self {
        Self::new(Arc::new(ConfigRegistry::new()))
    }

    pub fn registry(&self) -> &Arc<ConfigRegistry> {
        &self.registry
    }

    /// Wrap `handler`, snapshotting the current defaults merged with `overrides`
    pub fn create(
        &self,
        handler: impl Handler + 'static,
        overrides: &RunnerConfigOverrides,
    ) -> Runner {
        let config = self.registry.merge_with_overrides(overrides);
        let runner = Runner::new(handler, config);
        debug!(handler = runner.handler_name(), "Runner created");
        runner
    }

    /// Wrap `handler` with the current defaults
    pub fn wrap(&self, handler: impl Handler + 'static) -> Runner {
        self.create(handler, &RunnerConfigOverrides::default())
    }

    pub fn set_defaults(&self, overrides: &RunnerConfigOverrides) {
        self.registry.set_defaults(overrides);
    }

    pub fn get_defaults(&self) -> RunnerConfig {
        self.registry.defaults()
    }

    pub fn reset_defaults(&self) {
        self.registry.reset_defaults();
    }
}

impl Default for RunnerFactory {
    fn default() -> Self {
        Self::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::traits::handler_fn;
    use crate::hooks::hook_fn;
    use crate::test_utils::{CallbackProbe, CompletionCall, RecordingContext};
    use parking_lot::Mutex;
    use serde_json::json;

    fn succeeding() -> impl Handler {
        handler_fn(|_event: Value, _ctx: SharedContext| async {
            Ok::<Value, HandlerError>(Value::Bool(true))
        })
    }

    fn failing(error: HandlerError) -> impl Handler {
        handler_fn(move |_event: Value, _ctx: SharedContext| {
            let error = error.clone();
            async move { Err::<Value, _>(error) }
        })
    }

    #[tokio::test]
    async fn test_success_signals_once() {
        let runner = RunnerFactory::isolated().wrap(succeeding());
        let context = Arc::new(RecordingContext::new());
        let probe = CallbackProbe::new();

        let outcome = runner
            .invoke(json!({}), context.clone(), Some(probe.callback()))
            .await;

        assert_eq!(outcome, Outcome::Success(Value::Bool(true)));
        assert_eq!(context.calls(), vec![CompletionCall::Succeed(Value::Bool(true))]);
        assert_eq!(probe.calls(), vec![Ok(Value::Bool(true))]);
    }

    #[tokio::test]
    async fn test_failure_signals_formatted_message() {
        let runner = RunnerFactory::isolated().wrap(failing(HandlerError::new("Error")));
        let context = Arc::new(RecordingContext::new());
        let probe = CallbackProbe::new();

        let outcome = runner
            .invoke(json!({}), context.clone(), Some(probe.callback()))
            .await;

        assert_eq!(outcome.failure_message(), Some("Error: Error"));
        assert_eq!(context.calls(), vec![CompletionCall::Fail("Error: Error".to_string())]);
        assert_eq!(probe.calls(), vec![Err(HandlerError::new("Error"))]);
    }

    #[tokio::test]
    async fn test_hooks_run_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let (init_order, success_order, handler_order) =
            (Arc::clone(&order), Arc::clone(&order), Arc::clone(&order));

        let overrides = RunnerConfigOverrides::new()
            .with_on_init(hook_fn(move |_payload: InitPayload| {
                let order = Arc::clone(&init_order);
                async move {
                    order.lock().push("init");
                    Ok::<(), HandlerError>(())
                }
            }))
            .with_on_success(hook_fn(move |_payload: SuccessPayload| {
                let order = Arc::clone(&success_order);
                async move {
                    order.lock().push("success");
                    Ok::<(), HandlerError>(())
                }
            }));

        let runner = RunnerFactory::isolated().create(
            handler_fn(move |_event: Value, _ctx: SharedContext| {
                let order = Arc::clone(&handler_order);
                async move {
                    order.lock().push("handler");
                    Ok::<Value, HandlerError>(Value::Null)
                }
            }),
            &overrides,
        );

        runner
            .invoke(json!({}), Arc::new(RecordingContext::new()), None)
            .await;

        assert_eq!(*order.lock(), vec!["init", "handler", "success"]);
    }

    #[tokio::test]
    async fn test_dispatch_completes_in_background() {
        let runner = RunnerFactory::isolated().wrap(succeeding());
        let context = Arc::new(RecordingContext::new());
        let probe = CallbackProbe::new();

        let handle = runner.dispatch(json!({"id": 9}), context.clone(), Some(probe.callback()));
        let outcome = handle.await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(context.succeed_calls(), vec![Value::Bool(true)]);
        assert_eq!(probe.call_count(), 1);
    }

    #[tokio::test]
    async fn test_runner_captures_config_at_creation() {
        let factory = RunnerFactory::isolated();
        let runner = factory.wrap(failing(HandlerError::new("Error")));

        factory.set_defaults(&RunnerConfigOverrides::new().with_error_prefix("Later: "));

        let context = Arc::new(RecordingContext::new());
        runner.invoke(json!({}), context.clone(), None).await;

        assert_eq!(runner.config().error_prefix, "Error: ");
        assert_eq!(context.fail_calls(), vec!["Error: Error".to_string()]);
        assert_eq!(factory.get_defaults().error_prefix, "Later: ");
    }
}
