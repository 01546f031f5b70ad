//! # Lifecycle Hooks
//!
//! User-supplied async callbacks fired at three points of an invocation:
//!
//! - **on_init**: before the handler runs, with [`InitPayload`]
//! - **on_success**: after the handler resolves, with [`SuccessPayload`]
//! - **on_error**: after the handler (or an earlier hook) fails, with [`ErrorPayload`]
//!
//! A hook resolving to `Err` from on_init or on_success fails the invocation the same
//! way a handler error does. An on_error failure is absorbed by the runner.
//!
//! ```rust
//! use lambda_runner::hooks::{hook_fn, SuccessPayload};
//! use lambda_runner::HandlerError;
//!
//! let audit = hook_fn(|payload: SuccessPayload| async move {
//!     tracing::info!(response = %payload.response, "handler succeeded");
//!     Ok::<(), HandlerError>(())
//! });
//! # let _ = audit;
//! ```

use crate::client::context::SharedContext;
use crate::error::HandlerError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Payload for the on_init hook
#[derive(Clone)]
pub struct InitPayload {
    pub request: Value,
    pub context: SharedContext,
}

impl fmt::Debug for InitPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitPayload")
            .field("request", &self.request)
            .field("request_id", &self.context.request_id())
            .finish()
    }
}

/// Payload for the on_success hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessPayload {
    pub request: Value,
    pub response: Value,
}

/// Payload for the on_error hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub request: Value,
    pub response: ErrorResponse,
}

/// Raw failure alongside the message the runtime will receive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: HandlerError,
    #[serde(rename = "formattedError")]
    pub formatted_error: String,
}

/// An async callback invoked at one lifecycle point
#[async_trait]
pub trait LifecycleHook<P: Send + 'static>: Send + Sync {
    async fn call(&self, payload: P) -> Result<(), HandlerError>;
}

pub type InitHook = Arc<dyn LifecycleHook<InitPayload>>;
pub type SuccessHook = Arc<dyn LifecycleHook<SuccessPayload>>;
pub type ErrorHook = Arc<dyn LifecycleHook<ErrorPayload>>;

/// Hook that resolves immediately; the default at every lifecycle point
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

#[async_trait]
impl<P: Send + 'static> LifecycleHook<P> for NoopHook {
    async fn call(&self, _payload: P) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Hook built from an async closure
pub struct FnHook<F> {
    f: F,
}

/// Wrap an async closure `Fn(P) -> Future<Output = Result<(), HandlerError>>` as a hook
pub fn hook_fn<P, F, Fut>(f: F) -> FnHook<F>
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    FnHook { f }
}

#[async_trait]
impl<P, F, Fut> LifecycleHook<P> for FnHook<F>
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    async fn call(&self, payload: P) -> Result<(), HandlerError> {
        (self.f)(payload).await
    }
}
