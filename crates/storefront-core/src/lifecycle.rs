//! # Async Action Lifecycle
//!
//! Every asynchronous operation is observed as a pending event followed
//! by exactly one terminal event.
//!
//! ## Event Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Invocation, Two Events                           │
//! │                                                                         │
//! │  invoke("users/signup")                                                 │
//! │       │                                                                 │
//! │       ├──► Pending              (always first, before any I/O)          │
//! │       │                                                                 │
//! │       └──► exactly ONE of:                                              │
//! │              Fulfilled(value)   (operation succeeded)                   │
//! │              Rejected(payload)  (payload = server body, or None)        │
//! │                                                                         │
//! │  All events of one invocation share the same ActionMeta.request_id      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The request id is for correlation and logs. It is not a sequencing
//! token: a late response from an earlier invocation is still applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Error Body
// =============================================================================

/// A structured error body sent by the server, e.g. `{"message": "..."}`.
///
/// `message` is optional because a body can be structured JSON without
/// carrying a message; such a body is treated like no body at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn with_message(message: impl Into<String>) -> Self {
        ErrorBody {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Picks the user-visible text for a rejection.
///
/// ## Example
/// ```rust
/// use storefront_core::lifecycle::{rejection_message, ErrorBody};
///
/// let body = ErrorBody::with_message("Email taken");
/// assert_eq!(rejection_message(Some(&body), "fallback"), "Email taken");
/// assert_eq!(rejection_message(None, "fallback"), "fallback");
/// ```
pub fn rejection_message(payload: Option<&ErrorBody>, fallback: &str) -> String {
    payload
        .and_then(ErrorBody::message)
        .unwrap_or(fallback)
        .to_string()
}

// =============================================================================
// Lifecycle
// =============================================================================

/// The phase of one async operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    Rejected(Option<ErrorBody>),
}

impl<T> Lifecycle<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Lifecycle::Pending)
    }

    /// Short name used in logs.
    pub fn phase_name(&self) -> &'static str {
        match self {
            Lifecycle::Pending => "pending",
            Lifecycle::Fulfilled(_) => "fulfilled",
            Lifecycle::Rejected(_) => "rejected",
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lifecycle<U> {
        match self {
            Lifecycle::Pending => Lifecycle::Pending,
            Lifecycle::Fulfilled(value) => Lifecycle::Fulfilled(f(value)),
            Lifecycle::Rejected(payload) => Lifecycle::Rejected(payload),
        }
    }
}

// =============================================================================
// Action Meta
// =============================================================================

/// Identifies one invocation of an async operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMeta {
    /// Operation name, e.g. `users/signup`.
    pub operation: String,

    /// Shared by the pending and terminal event of one invocation.
    pub request_id: Uuid,
}

impl ActionMeta {
    pub fn new(operation: impl Into<String>) -> Self {
        ActionMeta {
            operation: operation.into(),
            request_id: Uuid::new_v4(),
        }
    }
}

impl fmt::Display for ActionMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.operation, self.request_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_prefers_server_text() {
        let body = ErrorBody::with_message("Username already exists");
        assert_eq!(
            rejection_message(Some(&body), "Signup failed. Please try again."),
            "Username already exists"
        );
    }

    #[test]
    fn test_rejection_message_without_message_uses_fallback() {
        let body = ErrorBody::default();
        assert_eq!(rejection_message(Some(&body), "fallback"), "fallback");
        assert_eq!(rejection_message(None, "fallback"), "fallback");
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"nope","code":7}"#).unwrap();
        assert_eq!(body.message(), Some("nope"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_lifecycle_helpers() {
        let pending: Lifecycle<u8> = Lifecycle::Pending;
        assert!(!pending.is_terminal());
        assert_eq!(pending.phase_name(), "pending");

        let fulfilled = Lifecycle::Fulfilled(2u8).map(|v| v * 10);
        assert_eq!(fulfilled, Lifecycle::Fulfilled(20));
        assert!(fulfilled.is_terminal());

        let rejected: Lifecycle<u8> = Lifecycle::Rejected(None);
        assert_eq!(rejected.phase_name(), "rejected");
    }

    #[test]
    fn test_meta_ids_are_unique_per_invocation() {
        let a = ActionMeta::new("users/signup");
        let b = ActionMeta::new("users/signup");
        assert_ne!(a.request_id, b.request_id);
        assert!(a.to_string().starts_with("users/signup#"));
    }
}
