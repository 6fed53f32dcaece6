//! # Flows
//!
//! The user-facing operations. Each flow issues requests through `api/`,
//! reports the outcome through the [`Notifier`](crate::notify::Notifier)
//! and keeps whatever view state it owns.
//!
//! ```text
//! flows/
//! ├── signup.rs    ◄─── SignupFlow      (runner + User slice)
//! ├── cart.rs      ◄─── CartFlow        (refetch after mutation, Cart slice)
//! ├── admin.rs     ◄─── AdminUsersFlow  (paged user table, role changes)
//! └── catalog.rs   ◄─── CatalogFlow     (collections, product upload)
//! ```
//!
//! Flows never return network errors: every failure is turned into a
//! notification and a [`FlowOutcome`].

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod signup;

pub use admin::{AdminUsersFlow, UserTable};
pub use cart::{CartFlow, CartView};
pub use catalog::CatalogFlow;
pub use signup::SignupFlow;

use storefront_core::FieldErrors;

use crate::error::ClientError;

/// How a flow operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The server confirmed the operation.
    Applied,
    /// The server answered 2xx but not `200`; nothing was applied.
    Unconfirmed,
    /// The request failed; the message was shown to the user.
    Failed(String),
    /// The operation was not allowed in the current state; nothing was sent.
    Blocked(String),
    /// Client-side validation failed; nothing was sent.
    Invalid(FieldErrors),
}

impl FlowOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FlowOutcome::Applied)
    }
}

/// The server's message if the failure carried one, else `fallback`.
pub(crate) fn failure_message(error: &ClientError, fallback: &str) -> String {
    error.server_message().unwrap_or(fallback).to_string()
}
