//! # Test Utilities
//!
//! In-memory stand-ins for the invocation runtime. [`RecordingContext`] records every
//! completion primitive it receives and [`CallbackProbe`] records completion-callback
//! calls, so tests can assert the exactly-once contract without a real runtime.

use crate::client::context::InvocationContext;
use crate::error::HandlerError;
use crate::orchestration::signaler::CompletionCallback;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// A completion primitive call observed by [`RecordingContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionCall {
    Succeed(Value),
    Fail(String),
}

/// Invocation context that records calls instead of talking to a runtime
#[derive(Debug, Default)]
pub struct RecordingContext {
    request_id: Option<String>,
    calls: Mutex<Vec<CompletionCall>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All completion calls, in order
    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().clone()
    }

    pub fn succeed_calls(&self) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CompletionCall::Succeed(value) => Some(value.clone()),
                CompletionCall::Fail(_) => None,
            })
            .collect()
    }

    pub fn fail_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CompletionCall::Fail(message) => Some(message.clone()),
                CompletionCall::Succeed(_) => None,
            })
            .collect()
    }

    pub fn succeeded(&self) -> bool {
        !self.succeed_calls().is_empty()
    }

    pub fn failed(&self) -> bool {
        !self.fail_calls().is_empty()
    }
}

impl InvocationContext for RecordingContext {
    fn succeed(&self, result: Value) {
        self.calls.lock().push(CompletionCall::Succeed(result));
    }

    fn fail(&self, message: String) {
        self.calls.lock().push(CompletionCall::Fail(message));
    }

    fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

/// Records every call made to the completion callbacks it hands out
#[derive(Debug, Clone, Default)]
pub struct CallbackProbe {
    calls: Arc<Mutex<Vec<Result<Value, HandlerError>>>>,
}

impl CallbackProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that appends its argument to this probe
    pub fn callback(&self) -> CompletionCallback {
        let calls = Arc::clone(&self.calls);
        Box::new(move |outcome| calls.lock().push(outcome))
    }

    pub fn calls(&self) -> Vec<Result<Value, HandlerError>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}
