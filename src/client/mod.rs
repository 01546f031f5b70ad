//! # Client Boundary
//!
//! Types a caller touches when plugging a business handler into the runner:
//!
//! - **InvocationContext**: The runtime's `succeed`/`fail` completion primitives
//! - **Handler**: The business function being wrapped
//!
//! ## Usage
//!
//! ```rust
//! use lambda_runner::client::{handler_fn, SharedContext};
//! use lambda_runner::HandlerError;
//! use serde_json::{json, Value};
//!
//! let handler = handler_fn(|event: Value, _ctx: SharedContext| async move {
//!     match event.get("id") {
//!         Some(id) => Ok(json!({ "id": id, "status": "processed" })),
//!         None => Err(HandlerError::new("Not found: missing id")),
//!     }
//! });
//! # let _ = handler;
//! ```

pub mod context;
pub mod traits;

pub use context::{InvocationContext, SharedContext};
pub use traits::{handler_fn, FnHandler, Handler};
