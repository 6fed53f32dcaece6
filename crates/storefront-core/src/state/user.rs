//! # User Slice
//!
//! Holds the current user and the state of the signup request.
//!
//! ## Transition Table
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Event                │ Effect                                           │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ Signup(Pending)      │ loading = true,  error = None                    │
//! │ Signup(Fulfilled(u)) │ loading = false, user = Some(u)                  │
//! │ Signup(Rejected(p))  │ loading = false, error = p.message or fallback   │
//! │ SetUser(u)           │ user = Some(u)                                   │
//! │ ClearUser            │ user = None                                      │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! The phase is not stored as a tag: it is the `{loading, error, user}`
//! triple. [`UserState::phase`] derives a tag for display.

use serde::{Deserialize, Serialize};

use crate::lifecycle::{rejection_message, Lifecycle};
use crate::types::User;
use crate::UNKNOWN_ERROR_MESSAGE;

/// The User slice.
///
/// ## Invariants
/// - `loading == true` implies `error == None`
/// - After a completed signup exactly one of `user`/`error` was just set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Display tag derived from the triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPhase {
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl UserState {
    pub fn phase(&self) -> UserPhase {
        if self.loading {
            UserPhase::Pending
        } else if self.error.is_some() {
            UserPhase::Rejected
        } else if self.user.is_some() {
            UserPhase::Fulfilled
        } else {
            UserPhase::Idle
        }
    }
}

/// Events accepted by the User slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Lifecycle of the signup request.
    Signup(Lifecycle<User>),
    SetUser(User),
    ClearUser,
}

/// Applies one event. Pure: same input, same output.
pub fn reduce(state: &UserState, event: &UserEvent) -> UserState {
    let mut next = state.clone();

    match event {
        UserEvent::Signup(Lifecycle::Pending) => {
            next.loading = true;
            next.error = None;
        }
        UserEvent::Signup(Lifecycle::Fulfilled(user)) => {
            next.loading = false;
            next.user = Some(user.clone());
        }
        UserEvent::Signup(Lifecycle::Rejected(payload)) => {
            next.loading = false;
            next.error = Some(rejection_message(payload.as_ref(), UNKNOWN_ERROR_MESSAGE));
        }
        UserEvent::SetUser(user) => {
            next.user = Some(user.clone());
        }
        UserEvent::ClearUser => {
            next.user = None;
        }
    }

    next
}

// =============================================================================
// Unit Tests
// =============================================================================
