//! # Invocation Orchestration
//!
//! Everything that happens between the runtime handing over an event and the runtime
//! receiving its single completion signal.
//!
//! ## Core Components
//!
//! - **RunnerFactory / Runner**: Wraps a handler and runs the invocation lifecycle
//! - **Error classifier**: Maps raw errors to not-found or generic formatted messages
//! - **InvocationState**: The per-invocation state machine
//! - **CompletionSignaler**: Sole caller of the runtime's `succeed` / `fail` primitives

pub mod error_classifier;
pub mod runner;
pub mod signaler;
pub mod state;

pub use error_classifier::{
    classify, classify_error, format_error_message, ErrorCategory, ErrorClassification,
};
pub use runner::{Runner, RunnerFactory};
pub use signaler::{CompletionCallback, CompletionSignaler, Outcome};
pub use state::InvocationState;
