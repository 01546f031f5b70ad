//! # Handler Traits
//!
//! Defines the business handler seam. Implement [`Handler`] directly, or wrap an
//! async closure with [`handler_fn`].

use crate::client::context::SharedContext;
use crate::error::HandlerError;
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

/// Opaque business function adapted by the runner
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle one event
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The result passed to the success primitive unchanged
    /// * `Err(HandlerError)` - The raw failure, formatted before it reaches the runtime
    async fn handle(&self, event: Value, context: SharedContext) -> Result<Value, HandlerError>;

    /// Name used for logging and debugging.
    fn handler_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Handler built from an async closure
pub struct FnHandler<F> {
    f: F,
}

/// Wrap an async closure `Fn(Value, SharedContext) -> Future<Output = Result<Value, HandlerError>>`
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Value, SharedContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Value, SharedContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send,
{
    async fn handle(&self, event: Value, context: SharedContext) -> Result<Value, HandlerError> {
        (self.f)(event, context).await
    }

    fn handler_name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}
