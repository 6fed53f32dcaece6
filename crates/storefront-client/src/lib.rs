//! # storefront-client: Side Effects of the Storefront Client
//!
//! This crate talks to the storefront REST backend, keeps the shared
//! state store and drives the user-facing flows (signup, cart, admin user
//! table, seller catalog).
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Client Architecture                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Storefront (wiring / facade)                  │  │
//! │  │  Built from ClientConfig, hands out flows sharing one Store      │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │      ┌────────────────┬───────┴────────┬─────────────────┐              │
//! │      ▼                ▼                ▼                 ▼              │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌────────────┐        │
//! │  │SignupFlow│   │ CartFlow │   │AdminUsersFlow│   │CatalogFlow │        │
//! │  └────┬─────┘   └────┬─────┘   └──────┬───────┘   └─────┬──────┘        │
//! │       │ runner       │ refetch        │ refetch         │ storage       │
//! │       ▼              ▼                ▼                 ▼               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  api/ (CartApi, UsersApi, CollectionsApi) ──► HttpClient         │  │
//! │  │                                                └──► Transport    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Store: User slice + Cart slice, mutated only through reducers.        │
//! │  Notifier: transient success/error messages for the view layer.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Client error type
//! - [`http`] - `Transport` seam, reqwest transport and `HttpClient`
//! - [`api`] - Typed endpoint wrappers
//! - [`runner`] - Async action runner (pending → fulfilled | rejected)
//! - [`store`] - Shared state store with change notifications
//! - [`notify`] - Notification sink
//! - [`storage`] - Persisted key/value local storage
//! - [`flows`] - Signup, cart, admin and catalog flows
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_client::{ClientConfig, Storefront};
//!
//! let config = ClientConfig::load_or_default(None);
//! let storefront = Storefront::from_config(&config, notifier)?;
//!
//! storefront.cart().fetch().await;
//! println!("{} items", storefront.store().cart().count);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod notify;
pub mod runner;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::StorefrontApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use flows::{
    AdminUsersFlow, CartFlow, CartView, CatalogFlow, FlowOutcome, SignupFlow, UserTable,
};
pub use http::{HttpClient, ReqwestTransport, Transport};
pub use notify::{NoOpNotifier, Notifier, RecordingNotifier};
pub use runner::AsyncActionRunner;
pub use storage::LocalStorage;
pub use store::{Store, StoreChange, StoreEvent};

use std::sync::Arc;

// =============================================================================
// Storefront
// =============================================================================

/// Wires the shared pieces together and hands out flows.
///
/// Every flow created from one `Storefront` shares the same store,
/// notifier and local storage.
#[derive(Clone)]
pub struct Storefront {
    api: StorefrontApi,
    store: Arc<Store>,
    storage: Arc<LocalStorage>,
    notifier: Arc<dyn Notifier>,
}

impl Storefront {
    /// Creates a storefront from explicit parts.
    pub fn new(
        http: HttpClient,
        storage: Arc<LocalStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Storefront {
            api: StorefrontApi::new(http),
            store: Arc::new(Store::new()),
            storage,
            notifier,
        }
    }

    /// Creates a storefront backed by reqwest and the configured storage file.
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(&config.api)?;
        let http = HttpClient::new(Arc::new(transport));
        let storage = match config.storage_path() {
            Some(path) => LocalStorage::open(path)?,
            None => LocalStorage::in_memory(),
        };
        Ok(Self::new(http, Arc::new(storage), notifier))
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    pub fn signup(&self) -> SignupFlow {
        SignupFlow::new(
            self.api.users(),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        )
    }

    pub fn cart(&self) -> CartFlow {
        CartFlow::new(
            self.api.cart(),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        )
    }

    pub fn admin_users(&self) -> AdminUsersFlow {
        AdminUsersFlow::new(self.api.users(), Arc::clone(&self.notifier))
    }

    pub fn catalog(&self) -> CatalogFlow {
        CatalogFlow::new(
            self.api.collections(),
            Arc::clone(&self.storage),
            Arc::clone(&self.notifier),
        )
    }
}
