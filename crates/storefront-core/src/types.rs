//! # Domain Types
//!
//! Wire types exchanged with the storefront backend, plus the small value
//! types the view layer consumes.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    CartItem     │   │   Collection    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  productId      │   │  id             │       │
//! │  │  username       │   │  name           │   │  name           │       │
//! │  │  email          │   │  price (Money)  │   │  description    │       │
//! │  │  userRole?      │   │  quantity       │   └─────────────────┘       │
//! │  │  status?        │   │  images[]       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Responses: SignupResponse, CartEnvelope, MessageResponse,             │
//! │             UserPage, CollectionList                                   │
//! │  Requests:  SignupRequest, QuantityUpdateRequest, ChangeRoleRequest,   │
//! │             NewCollection                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All JSON field names are camelCase to match the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A storefront account.
///
/// Users are replaced wholesale on every update, never merged field by
/// field, so this type has no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server identifier. Older endpoints emit it as `_id`.
    #[serde(alias = "_id")]
    pub id: String,

    pub username: String,

    pub email: String,

    /// Only present on the admin listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,

    /// Account status as reported by the admin listing (e.g. "active").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            user_role: None,
            status: None,
        }
    }
}

/// Role assignable from the admin user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Seller,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Seller => write!(f, "seller"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "customer" => Ok(UserRole::User),
            "seller" => Ok(UserRole::Seller),
            "admin" => Ok(UserRole::Admin),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the server-side cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,

    pub name: String,

    /// Unit price.
    pub price: Money,

    pub quantity: i64,

    /// Image URLs; the first one is used as the thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
}

impl CartItem {
    /// Unit price × quantity, `None` when it overflows.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_multiply_quantity(self.quantity)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// The authoritative cart as returned by `GET /cart`.
///
/// Totals are the server's numbers; the client never recomputes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartItem>,

    #[serde(default)]
    pub total_quantity: i64,

    #[serde(default)]
    pub total_price: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `GET /cart` response body: `{ "cart": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartEnvelope {
    pub cart: CartSnapshot,
}

/// One entry of a quantity update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityUpdate {
    pub product_id: String,
    pub quantity: i64,
}

/// `PATCH /cart/products/:id` body: `{ "items": [{ productId, quantity }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityUpdateRequest {
    pub items: Vec<QuantityUpdate>,
}

impl QuantityUpdateRequest {
    pub fn single(product_id: impl Into<String>, quantity: i64) -> Self {
        QuantityUpdateRequest {
            items: vec![QuantityUpdate {
                product_id: product_id.into(),
                quantity,
            }],
        }
    }
}

// =============================================================================
// Users (signup and admin)
// =============================================================================

/// `POST /users/signup` body. The email is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /users/signup` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

/// Pagination block of `GET /users?page=N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_pages: u32,
}

/// `GET /users?page=N` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `POST /users/ChangeRole/:id` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub new_role: UserRole,
}

// =============================================================================
// Collections
// =============================================================================

/// A named grouping of products owned by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /collections` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCollection {
    pub name: String,
    pub description: String,
}

/// `GET /collections?limit=100` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionList {
    #[serde(default)]
    pub collections: Vec<Collection>,
}

// =============================================================================
// Generic Responses
// =============================================================================

/// Confirmation body returned by every mutating endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Notifications
// =============================================================================

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast shown by the view layer after a flow completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
