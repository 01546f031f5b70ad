//! # Invocation Context
//!
//! The boundary to the external invocation runtime. A runtime hands the runner one
//! context per event; the context exposes the two completion primitives.

use serde_json::Value;
use std::sync::Arc;

/// Completion primitives supplied by the invocation runtime
///
/// Exactly one of [`succeed`](InvocationContext::succeed) or
/// [`fail`](InvocationContext::fail) is called per invocation, and only by the
/// completion signaler.
pub trait InvocationContext: Send + Sync {
    /// Report success with the handler's raw result
    fn succeed(&self, result: Value);

    /// Report failure with an already formatted message
    fn fail(&self, message: String);

    /// Runtime-assigned request identifier, used to tag log output
    fn request_id(&self) -> Option<&str> {
        None
    }
}

/// Context shared between the runner, the handler and the init hook
pub type SharedContext = Arc<dyn InvocationContext>;
