//! # Invocation State Machine
//!
//! Lifecycle of a single invocation:
//!
//! ```text
//! Idle → Initializing → Invoking → Succeeding ─┐
//!            │             │          │        ├→ NotifyingOutcome → Completed
//!            └─────────────┴──────────┴→ Failing ┘
//! ```
//!
//! A failing on_init or on_success hook moves the invocation to `Failing` just like a
//! handler error does.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    Idle,
    Initializing,
    Invoking,
    Succeeding,
    Failing,
    NotifyingOutcome,
    Completed,
}

impl InvocationState {
    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(self, next: InvocationState) -> bool {
        use InvocationState::*;
        matches!(
            (self, next),
            (Idle, Initializing)
                | (Initializing, Invoking)
                | (Initializing, Failing)
                | (Invoking, Succeeding)
                | (Invoking, Failing)
                | (Succeeding, NotifyingOutcome)
                | (Succeeding, Failing)
                | (Failing, NotifyingOutcome)
                | (NotifyingOutcome, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == InvocationState::Completed
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationState::Idle => "idle",
            InvocationState::Initializing => "initializing",
            InvocationState::Invoking => "invoking",
            InvocationState::Succeeding => "succeeding",
            InvocationState::Failing => "failing",
            InvocationState::NotifyingOutcome => "notifying_outcome",
            InvocationState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Tracks the current state of one invocation
#[derive(Debug)]
pub(crate) struct InvocationLifecycle {
    state: InvocationState,
}

impl InvocationLifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: InvocationState::Idle,
        }
    }

    pub(crate) fn state(&self) -> InvocationState {
        self.state
    }

    /// Move to `next`; the runner only ever requests legal transitions
    pub(crate) fn transition(&mut self, next: InvocationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal invocation transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Invocation state transition");
        self.state = next;
    }
}
