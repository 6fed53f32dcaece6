//! # Validation Module
//!
//! Field validators used by the signup, collection and product forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (THIS MODULE)                                           │
//! │  ├── Required fields, formats, ranges                                  │
//! │  ├── Normalization (email trim + lowercase)                            │
//! │  └── Failure → inline per-field message, request never sent            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend                                                      │
//! │  ├── Uniqueness, authorization, stock                                  │
//! │  └── Failure → { message } body → notification                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_email, validate_sku};
//!
//! assert_eq!(validate_email("  Test@EXAMPLE.com ").unwrap(), "test@example.com");
//! assert!(validate_sku("MUG-01").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_PRODUCT_IMAGES, MAX_SKU_LENGTH, MIN_PRODUCT_IMAGES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is present and returns it trimmed.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Trims and lower-cases an email address.
///
/// This is a validation-time transform: the normalized value is what gets
/// sent, the form keeps whatever the user typed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an email address and returns it normalized.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace inside
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = normalize_email(email);

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(email),
        _ => Err(invalid()),
    }
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_sku;
///
/// assert!(validate_sku("MUG-330").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<String> {
    let sku = validate_required("sku", sku)?;

    if sku.len() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(sku)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Update Quantity                                                  │
/// │                                                                         │
/// │  User types quantity: 0                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Update button disabled, no request               │
/// │       │                                                                 │
/// │       └── OK → PATCH /cart/products/:id                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(qty)
}

/// Whether the update-quantity submit control is enabled for `qty`.
pub fn quantity_submit_enabled(qty: i64) -> bool {
    validate_quantity(qty).is_ok()
}

/// Parses a money field typed by the user.
pub fn parse_money(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = validate_required(field, raw)?;

    raw.parse::<Money>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number with at most two decimals".to_string(),
        })
}

/// Validates a product price. Must be strictly positive.
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Validates a product bonus. Zero is allowed.
pub fn validate_bonus(bonus: Money) -> ValidationResult<Money> {
    if bonus.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "bonus".to_string(),
        });
    }

    Ok(bonus)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of images attached to a product (4 to 8).
pub fn validate_image_count(count: usize) -> ValidationResult<usize> {
    if !(MIN_PRODUCT_IMAGES..=MAX_PRODUCT_IMAGES).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "images".to_string(),
            min: MIN_PRODUCT_IMAGES as i64,
            max: MAX_PRODUCT_IMAGES as i64,
        });
    }

    Ok(count)
}

// =============================================================================
// Unit Tests
// =============================================================================
