//! # Client Error Types
//!
//! Error types for everything that talks to the backend or the disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Server              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Status { status, body }│ │
//! │  │  InvalidUrl     │  │  Decode         │  │   body = ErrorBody when │ │
//! │  │  ConfigLoad/Save│  │                 │  │   the reply was JSON    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Storage      │  │   Request       │                              │
//! │  │                 │  │                 │                              │
//! │  │  Storage        │  │  InvalidId      │                              │
//! │  │                 │  │  (no request)   │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Structured vs Unstructured Failures
//!
//! Only a `Status` error whose reply parsed as a JSON object carries an
//! [`ErrorBody`]. Every other failure has no body, so flows fall back to
//! their own message.

use storefront_core::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering configuration, network and storage failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered outside 2xx.
    #[error("Server responded with status {status}")]
    Status {
        status: u16,
        body: Option<ErrorBody>,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Local storage could not be read or written.
    #[error("Local storage error: {0}")]
    Storage(String),

    /// An id that cannot be sent as a single path segment; no request
    /// was sent.
    #[error("Invalid resource id: {0:?}")]
    InvalidId(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidConfig(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// The structured body the server replied with, if any.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            ClientError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// The server's `message`, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        self.error_body().and_then(ErrorBody::message)
    }

    /// HTTP status for server rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_structured_status() {
        let err = ClientError::Status {
            status: 400,
            body: Some(ErrorBody::with_message("Failed to remove item from cart")),
        };
        assert_eq!(err.server_message(), Some("Failed to remove item from cart"));
        assert_eq!(err.status(), Some(400));

        let err = ClientError::Status {
            status: 502,
            body: None,
        };
        assert_eq!(err.server_message(), None);

        let err = ClientError::Transport("connection refused".into());
        assert_eq!(err.server_message(), None);
        assert!(err.error_body().is_none());
    }

    #[test]
    fn test_local_errors_have_no_status() {
        let err = ClientError::InvalidId("..".into());
        assert_eq!(err.status(), None);
        assert!(err.error_body().is_none());
        assert_eq!(err.to_string(), "Invalid resource id: \"..\"");
    }

    #[test]
    fn test_conversions() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err: ClientError = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));

        let err: ClientError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, ClientError::ConfigLoadFailed(_)));
    }
}
