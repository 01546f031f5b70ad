//! Shared fixtures for runner integration tests.

#![allow(dead_code)]

use lambda_runner::client::{handler_fn, Handler, SharedContext};
use lambda_runner::hooks::{hook_fn, LifecycleHook};
use lambda_runner::HandlerError;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Handler resolving with `true`
pub fn lambda_success() -> impl Handler {
    handler_fn(|_event: Value, _ctx: SharedContext| async {
        Ok::<Value, HandlerError>(Value::Bool(true))
    })
}

/// Handler echoing the event back
pub fn lambda_echo() -> impl Handler {
    handler_fn(|event: Value, _ctx: SharedContext| async move {
        Ok::<Value, HandlerError>(event)
    })
}

/// Handler rejecting with `error`
pub fn lambda_fail_with(error: HandlerError) -> impl Handler {
    handler_fn(move |_event: Value, _ctx: SharedContext| {
        let error = error.clone();
        async move { Err::<Value, HandlerError>(error) }
    })
}

pub fn lambda_fail() -> impl Handler {
    lambda_fail_with(HandlerError::new("Error"))
}

pub fn lambda_not_found() -> impl Handler {
    lambda_fail_with(HandlerError::new("Not found: couldnt find it"))
}

pub fn lambda_not_found_custom() -> impl Handler {
    lambda_fail_with(HandlerError::new("Lost! Cant find it"))
}

/// Records every payload a hook receives
#[derive(Clone)]
pub struct HookRecorder<P> {
    payloads: Arc<Mutex<Vec<P>>>,
}

impl<P: Clone + Send + 'static> HookRecorder<P> {
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hook that records its payload and resolves
    pub fn hook(&self) -> impl LifecycleHook<P> {
        let payloads = Arc::clone(&self.payloads);
        hook_fn(move |payload: P| {
            let payloads = Arc::clone(&payloads);
            async move {
                payloads.lock().push(payload);
                Ok::<(), HandlerError>(())
            }
        })
    }

    /// Hook that records its payload and then rejects with `error`
    pub fn failing_hook(&self, error: HandlerError) -> impl LifecycleHook<P> {
        let payloads = Arc::clone(&self.payloads);
        hook_fn(move |payload: P| {
            let payloads = Arc::clone(&payloads);
            let error = error.clone();
            async move {
                payloads.lock().push(payload);
                Err::<(), HandlerError>(error)
            }
        })
    }

    pub fn payloads(&self) -> Vec<P> {
        self.payloads.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.payloads.lock().len()
    }
}
