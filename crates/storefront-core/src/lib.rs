//! # storefront-core: Pure Domain Logic for the Storefront Client
//!
//! Everything in this crate is deterministic and free of I/O. The HTTP
//! client, the state store and the flows live in `storefront-client`;
//! they call into this crate for types, validation and state transitions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Client Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View Layer (storefront-cli)                     │   │
//! │  │     Signup form ──► Cart view ──► Admin table ──► Seller forms  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ flows                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         storefront-client (HTTP, Runner, Store, Flows)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ lifecycle │  │ validation│  │   │
//! │  │   │  User     │  │   Money   │  │ Pending   │  │  forms    │  │   │
//! │  │   │  CartItem │  │           │  │ Fulfilled │  │  fields   │  │   │
//! │  │   └───────────┘  └───────────┘  │ Rejected  │  └───────────┘  │   │
//! │  │                                 └───────────┘                  │   │
//! │  │   ┌─────────────────────────────────────────────────────────┐  │   │
//! │  │   │ state: user reducer, cart reducer (pure)               │  │   │
//! │  │   └─────────────────────────────────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (User, CartItem, Collection, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators and normalization
//! - [`forms`] - Signup, collection and product forms
//! - [`lifecycle`] - Async action lifecycle events
//! - [`state`] - Cart and User slices with their reducers
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::lifecycle::Lifecycle;
//! use storefront_core::state::user::{reduce, UserEvent, UserState};
//! use storefront_core::types::User;
//!
//! let user = User::new("u-1", "alice", "alice@example.com");
//!
//! let state = UserState::default();
//! let state = reduce(&state, &UserEvent::Signup(Lifecycle::Pending));
//! assert!(state.loading);
//!
//! let state = reduce(&state, &UserEvent::Signup(Lifecycle::Fulfilled(user.clone())));
//! assert!(!state.loading);
//! assert_eq!(state.user, Some(user));
//! assert_eq!(state.error, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod forms;
pub mod lifecycle;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, FieldErrors, ValidationError};
pub use lifecycle::{ActionMeta, ErrorBody, Lifecycle};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Error recorded in the User slice when a rejection carries no message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Minimum number of images a product must be submitted with.
pub const MIN_PRODUCT_IMAGES: usize = 4;

/// Maximum number of images a product can be submitted with.
pub const MAX_PRODUCT_IMAGES: usize = 8;

/// Maximum SKU length accepted by the product form.
pub const MAX_SKU_LENGTH: usize = 50;

/// Page size used when listing collections for the seller picker.
pub const COLLECTION_LIST_LIMIT: u32 = 100;
