//! # API Module
//!
//! Typed wrappers around the storefront REST endpoints.
//!
//! ## Endpoint Wrappers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Flow                                                                   │
//! │       │                                                                 │
//! │       │  api.cart().delete_item("p1")                                   │
//! │       ▼                                                                 │
//! │  CartApi                                                                │
//! │  ├── fetch()                    GET    /cart                            │
//! │  ├── delete_item(id)            DELETE /cart/products/:id               │
//! │  ├── clear()                    DELETE /cart/clear                      │
//! │  └── update_quantity(id, qty)   PATCH  /cart/products/:id               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HttpClient ──► Transport                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call returns a [`Reply`] carrying the exact status, so flows can
//! tell a `200` confirmation from any other 2xx.
//!
//! ## Available Wrappers
//!
//! - [`CartApi`] - Cart fetch and mutations
//! - [`UsersApi`] - Signup, admin listing and role changes
//! - [`CollectionsApi`] - Seller collections and product upload

pub mod cart;
pub mod collections;
pub mod users;

pub use cart::CartApi;
pub use collections::CollectionsApi;
pub use users::UsersApi;

use serde::de::DeserializeOwned;

use crate::error::ClientResult;
use crate::http::{ApiResponse, HttpClient};

/// A decoded 2xx reply together with its status.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: u16,
    pub data: T,
}

impl<T> Reply<T> {
    /// Only `200 OK` counts as a confirmation for mutations.
    pub fn is_confirmed(&self) -> bool {
        self.status == 200
    }
}

impl<T: DeserializeOwned> Reply<T> {
    pub(crate) fn decode(response: ApiResponse) -> ClientResult<Self> {
        Ok(Reply {
            status: response.status,
            data: response.decode()?,
        })
    }
}

/// Entry point handing out the per-resource wrappers.
#[derive(Clone)]
pub struct StorefrontApi {
    http: HttpClient,
}

impl StorefrontApi {
    pub fn new(http: HttpClient) -> Self {
        StorefrontApi { http }
    }

    pub fn cart(&self) -> CartApi {
        CartApi::new(self.http.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.http.clone())
    }

    pub fn collections(&self) -> CollectionsApi {
        CollectionsApi::new(self.http.clone())
    }
}
