#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Lambda Runner
//!
//! Lifecycle wrapper that adapts an asynchronous business handler to an invocation
//! runtime expecting exactly one `succeed` or `fail` signal per event.
//!
//! ## Overview
//!
//! A runtime invokes a [`Runner`] once per event. The runner fires the on_init hook,
//! awaits the handler, then either fires on_success and signals success with the raw
//! result, or formats the failure, fires on_error and signals failure with the formatted
//! message. Failures of the on_error hook are swallowed and only logged in debug mode.
//!
//! ## Module Organization
//!
//! - [`client`] - Runtime context and handler traits
//! - [`config`] - Runner configuration, the defaults registry and settings loading
//! - [`error`] - Raw handler errors and crate errors
//! - [`hooks`] - Lifecycle hook trait and payloads
//! - [`orchestration`] - Runner, error classification, state machine and signaling
//! - [`logging`] - Structured logging setup and helpers
//! - [`test_utils`] - Recording runtime context and callback probe
//!
//! ## Quick Start
//!
//! ```rust
//! use lambda_runner::client::{handler_fn, SharedContext};
//! use lambda_runner::test_utils::RecordingContext;
//! use lambda_runner::{HandlerError, RunnerFactory};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let factory = RunnerFactory::isolated();
//! let runner = factory.wrap(handler_fn(|event: Value, _ctx: SharedContext| async move {
//!     Ok::<Value, HandlerError>(json!({ "received": event }))
//! }));
//!
//! let context = Arc::new(RecordingContext::new());
//! runner.invoke(json!({"id": 1}), context.clone(), None).await;
//! assert_eq!(context.succeed_calls(), vec![json!({"received": {"id": 1}})]);
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod orchestration;
pub mod test_utils;

pub use client::{handler_fn, Handler, InvocationContext, SharedContext};
pub use config::{ConfigRegistry, RunnerConfig, RunnerConfigOverrides, RunnerSettings};
pub use error::{HandlerError, Result, RunnerError};
pub use hooks::{hook_fn, ErrorPayload, InitPayload, LifecycleHook, NoopHook, SuccessPayload};
pub use orchestration::{
    format_error_message, CompletionCallback, ErrorCategory, Outcome, Runner, RunnerFactory,
};
