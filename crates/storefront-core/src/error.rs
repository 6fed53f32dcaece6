//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One failed field rule                          │
//! │  └── FieldErrors      - Every failed rule of a form (inline messages)  │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                             │
//! │  └── ClientError      - Config, transport, status, storage failures    │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → ClientError → Notification      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation error names the field it belongs to
//! 3. Errors are enum variants, never String

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product was submitted before any collection was chosen.
    #[error("Please select a collection first")]
    NoCollectionSelected,

    /// A wire amount could not be represented as money.
    ///
    /// ## When This Occurs
    /// - Server sends `NaN`/`Infinity` encoded as a string
    /// - Amount is too large for i64 cents
    #[error("Invalid money amount: {0}")]
    InvalidAmount(String),

    /// A role string that is not one of `user`, `seller`, `admin`.
    #[error("Unknown user role: {0}")]
    UnknownRole(String),

    /// A single field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A whole form failed validation.
    #[error("Form has {} invalid field(s)", .0.len())]
    Form(FieldErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur client-side, before a request is built. The request is
/// never sent when any of them is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Count or numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., malformed email, bad SKU characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustNotBeNegative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// All validation failures of one form submission, in field order.
///
/// The view layer renders one inline message per field; only the first
/// failure of each field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(Vec::new())
    }

    /// Records a failure unless the field already has one.
    pub fn push(&mut self, err: ValidationError) {
        if self.for_field(err.field()).is_none() {
            self.0.push(err);
        }
    }

    /// Records the error of a validator result, if any.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    /// Returns the failure recorded for `field`.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Converts into `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Form(errors)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::OutOfRange {
            field: "images".to_string(),
            min: 4,
            max: 8,
        };
        assert_eq!(err.to_string(), "images must be between 4 and 8");
    }

    #[test]
    fn test_field_errors_keep_first_failure_per_field() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::Required {
            field: "sku".to_string(),
        });
        errors.push(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
        errors.push(ValidationError::MustBePositive {
            field: "price".to_string(),
        });

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field("sku").map(|e| e.to_string()),
            Some("sku is required".to_string())
        );
        assert!(errors.for_field("bonus").is_none());
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.check::<()>(Err(ValidationError::Required {
            field: "name".to_string(),
        }));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "username".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
