//! # Forms
//!
//! Raw form state as the user typed it, and the validated request each
//! form turns into. A form that fails validation yields [`FieldErrors`]
//! and no request.

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::money::Money;
use crate::types::{NewCollection, SignupRequest};
use crate::validation::{
    parse_money, validate_bonus, validate_email, validate_image_count, validate_price,
    validate_required, validate_sku,
};

// =============================================================================
// Signup
// =============================================================================

/// Signup form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        SignupForm {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validates every field and builds the request with a normalized email.
    ///
    /// The password is sent as typed; only presence is checked.
    pub fn validate(&self) -> Result<SignupRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = errors.check(validate_required("username", &self.username));
        let email = errors.check(validate_email(&self.email));
        let password_present = errors
            .check(validate_required("password", &self.password))
            .is_some();

        match (username, email, password_present) {
            (Some(username), Some(email), true) => Ok(SignupRequest {
                username,
                email,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// Back to empty field values.
    pub fn reset(&mut self) {
        *self = SignupForm::default();
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.email.is_empty() && self.password.is_empty()
    }
}

// =============================================================================
// Collection
// =============================================================================

/// Create-collection form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionForm {
    pub name: String,
    pub description: String,
}

impl CollectionForm {
    pub fn validate(&self) -> Result<NewCollection, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_required("name", &self.name));
        let description = errors.check(validate_required("description", &self.description));

        match (name, description) {
            (Some(name), Some(description)) => Ok(NewCollection { name, description }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// An image file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProductImage {
    /// Guesses the MIME type from the file extension.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = match file_name
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
        .to_string();

        ProductImage {
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Add-product form fields. Money fields hold the raw typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: String,
    pub bonus: String,
    pub images: Vec<ProductImage>,
}

/// A product form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProduct {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: Money,
    pub bonus: Money,
    pub images: Vec<ProductImage>,
}

impl ProductForm {
    /// Validates every field; an empty bonus counts as zero.
    pub fn validate(&self) -> Result<ValidProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check(validate_required("name", &self.name));
        let description = errors.check(validate_required("description", &self.description));
        let sku = errors.check(validate_sku(&self.sku));
        let price = errors.check(parse_money("price", &self.price).and_then(validate_price));
        let bonus = if self.bonus.trim().is_empty() {
            Some(Money::zero())
        } else {
            errors.check(parse_money("bonus", &self.bonus).and_then(validate_bonus))
        };
        errors.check(validate_image_count(self.images.len()));

        if !errors.is_empty() {
            return Err(errors);
        }

        match (name, description, sku, price, bonus) {
            (Some(name), Some(description), Some(sku), Some(price), Some(bonus)) => {
                Ok(ValidProduct {
                    name,
                    description,
                    sku,
                    price,
                    bonus,
                    images: self.images.clone(),
                })
            }
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
