//! # Seller Catalog
//!
//! Collections and product upload for sellers.
//!
//! ## Add Product
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_product(form)                                                      │
//! │       │                                                                 │
//! │       ├── form.validate()        fails ──► Invalid(field errors)        │
//! │       │                                                                 │
//! │       ├── storage["collectionId"] missing ──► notify                    │
//! │       │                          "Please select a collection first"     │
//! │       │                                                                 │
//! │       └── POST /collections/:id/product (multipart)                     │
//! │              forget collectionId, whatever the outcome                  │
//! │              ok   ──► notify message                                    │
//! │              fail ──► notify message or fallback                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::forms::{CollectionForm, ProductForm};
use storefront_core::{Collection, CoreError};
use tracing::{debug, info, warn};

use super::{failure_message, FlowOutcome};
use crate::api::CollectionsApi;
use crate::notify::Notifier;
use crate::storage::{LocalStorage, COLLECTION_ID_KEY};

pub const FETCH_COLLECTIONS_FAILED: &str = "Failed to fetch collections";
pub const CREATE_COLLECTION_FAILED: &str = "Failed to create collection";
pub const ADD_PRODUCT_FAILED: &str = "Failed to add product";
pub const COLLECTION_CREATED: &str = "Collection created successfully";
pub const PRODUCT_ADDED: &str = "Product added successfully";

pub struct CatalogFlow {
    api: CollectionsApi,
    storage: Arc<LocalStorage>,
    notifier: Arc<dyn Notifier>,
    collections: RwLock<Vec<Collection>>,
}

impl CatalogFlow {
    pub fn new(api: CollectionsApi, storage: Arc<LocalStorage>, notifier: Arc<dyn Notifier>) -> Self {
        CatalogFlow {
            api,
            storage,
            notifier,
            collections: RwLock::new(Vec::new()),
        }
    }

    pub fn collections(&self) -> Vec<Collection> {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The collection products will be added to, if one is selected.
    pub fn selected_collection(&self) -> Option<String> {
        self.storage.get(COLLECTION_ID_KEY)
    }

    pub async fn list_collections(&self) -> FlowOutcome {
        match self.api.list().await {
            Ok(reply) => {
                let collections = reply.data.collections;
                debug!(count = collections.len(), "Collections loaded");
                *self.collections.write().unwrap_or_else(PoisonError::into_inner) = collections;
                FlowOutcome::Applied
            }
            Err(error) => {
                let message = failure_message(&error, FETCH_COLLECTIONS_FAILED);
                warn!(operation = "collections/list", error = %error, "Loading collections failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }

    /// Creates a collection, then reloads the list.
    pub async fn create_collection(&self, form: &CollectionForm) -> FlowOutcome {
        let collection = match form.validate() {
            Ok(collection) => collection,
            Err(errors) => return FlowOutcome::Invalid(errors),
        };

        match self.api.create(&collection).await {
            Ok(_) => {
                info!(name = %collection.name, "Collection created");
                self.notifier.success(COLLECTION_CREATED);
                self.list_collections().await;
                FlowOutcome::Applied
            }
            Err(error) => {
                let message = failure_message(&error, CREATE_COLLECTION_FAILED);
                warn!(operation = "collections/create", error = %error, "Creating collection failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }

    /// Remembers `collection_id` for the next product upload.
    pub fn select_collection(&self, collection_id: &str) -> FlowOutcome {
        match self.storage.set(COLLECTION_ID_KEY, collection_id) {
            Ok(()) => {
                debug!(collection_id = %collection_id, "Collection selected");
                FlowOutcome::Applied
            }
            Err(error) => {
                let message = error.to_string();
                warn!(error = %error, "Saving selected collection failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }

    pub async fn add_product(&self, form: &ProductForm) -> FlowOutcome {
        let product = match form.validate() {
            Ok(product) => product,
            Err(errors) => {
                debug!(errors = %errors, "Product form invalid");
                return FlowOutcome::Invalid(errors);
            }
        };

        let Some(collection_id) = self.selected_collection() else {
            let message = CoreError::NoCollectionSelected.to_string();
            self.notifier.error(&message);
            return FlowOutcome::Blocked(message);
        };

        let result = self.api.add_product(&collection_id, &product).await;
        if let Err(error) = self.storage.remove(COLLECTION_ID_KEY) {
            warn!(error = %error, "Clearing selected collection failed");
        }

        match result {
            Ok(reply) => {
                let message = reply
                    .data
                    .message
                    .unwrap_or_else(|| PRODUCT_ADDED.to_string());
                info!(collection_id = %collection_id, sku = %product.sku, "Product added");
                self.notifier.success(&message);
                FlowOutcome::Applied
            }
            Err(error) => {
                let message = failure_message(&error, ADD_PRODUCT_FAILED);
                warn!(
                    operation = "collections/addProduct",
                    collection_id = %collection_id,
                    error = %error,
                    "Adding product failed"
                );
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }
}
