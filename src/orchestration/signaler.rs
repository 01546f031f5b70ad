//! # Completion Signaler
//!
//! The only code that touches the runtime's completion primitives. A signaler is
//! consumed by [`CompletionSignaler::signal`], so an invocation can signal at most once.

use crate::client::context::SharedContext;
use crate::error::HandlerError;
use serde_json::Value;
use tracing::debug;

/// Optional caller callback with `(error, result)` semantics
pub type CompletionCallback = Box<dyn FnOnce(Result<Value, HandlerError>) + Send>;

/// Final result of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure { error: HandlerError, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Formatted failure message, if the invocation failed
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Outcome::Failure { message, .. } => Some(message),
            Outcome::Success(_) => None,
        }
    }
}

pub struct CompletionSignaler {
    context: SharedContext,
    callback: Option<CompletionCallback>,
}

impl CompletionSignaler {
    pub fn new(context: SharedContext, callback: Option<CompletionCallback>) -> Self {
        Self { context, callback }
    }

    /// Deliver `outcome` to the runtime and the callback
    ///
    /// Success calls the callback before `succeed`; failure calls `fail` before the
    /// callback. The runtime only ever sees the formatted message, never the raw error.
    pub fn signal(self, outcome: &Outcome) {
        let Self { context, callback } = self;

        match outcome {
            Outcome::Success(result) => {
                debug!("Signalling success");
                if let Some(callback) = callback {
                    callback(Ok(result.clone()));
                }
                context.succeed(result.clone());
            }
            Outcome::Failure { error, message } => {
                debug!(formatted_error = %message, "Signalling failure");
                context.fail(message.clone());
                if let Some(callback) = callback {
                    callback(Err(error.clone()));
                }
            }
        }
    }
}
