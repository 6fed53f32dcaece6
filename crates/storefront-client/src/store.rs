//! # State Store
//!
//! Owns the User and Cart slices and applies events through the pure
//! reducers in `storefront_core::state`.
//!
//! ## Dispatch Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.dispatch(StoreEvent::Cart(CartEvent::Decrement))                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write lock on the cart slice                                           │
//! │       │  next = cart::reduce(&current, &event)                          │
//! │       ▼                                                                 │
//! │  broadcast StoreChange::Cart(next) to every subscriber                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers always get clones; the slices are never handed out by reference.

use std::sync::{PoisonError, RwLock};

use storefront_core::state::{cart, user, CartEvent, CartState, UserEvent, UserState};
use tokio::sync::broadcast;
use tracing::trace;

/// Capacity of the change channel. Slow subscribers skip older changes.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// An event routed to one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    User(UserEvent),
    Cart(CartEvent),
}

/// The new value of a slice after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    User(UserState),
    Cart(CartState),
}

/// Shared, thread-safe state store.
pub struct Store {
    user: RwLock<UserState>,
    cart: RwLock<CartState>,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Store {
            user: RwLock::new(UserState::default()),
            cart: RwLock::new(CartState::default()),
            changes,
        }
    }

    /// Applies one event to its slice and notifies subscribers.
    pub fn dispatch(&self, event: StoreEvent) {
        let change = match event {
            StoreEvent::User(event) => {
                let mut slice = self.user.write().unwrap_or_else(PoisonError::into_inner);
                *slice = user::reduce(&slice, &event);
                StoreChange::User(slice.clone())
            }
            StoreEvent::Cart(event) => {
                let mut slice = self.cart.write().unwrap_or_else(PoisonError::into_inner);
                *slice = cart::reduce(&slice, &event);
                StoreChange::Cart(*slice)
            }
        };

        trace!(?change, "Store updated");
        // No subscribers is fine.
        let _ = self.changes.send(change);
    }

    pub fn user(&self) -> UserState {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cart(&self) -> CartState {
        *self.cart.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receives every change dispatched after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
