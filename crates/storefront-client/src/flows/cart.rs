//! # Cart Flow
//!
//! Keeps the cart view in step with the server by refetching after every
//! confirmed mutation. Nothing is merged locally.
//!
//! ## Mutation Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  delete_item / clear / update_quantity                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutating request                                                       │
//! │       │                                                                 │
//! │       ├── 200 ─────► notify(message or default)                         │
//! │       │              apply count delta (delete: -1, clear: 0)           │
//! │       │              fetch()   ◄── authoritative, overwrites the delta  │
//! │       │                                                                 │
//! │       ├── other 2xx ► nothing (logged)                                  │
//! │       │                                                                 │
//! │       └── failure ─► notify(server message or fallback)                 │
//! │                      no refetch, view untouched                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent mutations are not queued: whichever refetch resolves last
//! decides the view.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::state::CartEvent;
use storefront_core::validation::quantity_submit_enabled;
use storefront_core::{CartItem, CartSnapshot, MessageResponse, Money};
use tracing::{debug, info, warn};

use super::{failure_message, FlowOutcome};
use crate::api::{CartApi, Reply};
use crate::error::ClientResult;
use crate::notify::Notifier;
use crate::store::{Store, StoreEvent};

pub const FETCH_CART_FAILED: &str = "Failed to fetch cart";
pub const DELETE_ITEM_FAILED: &str = "Failed to delete Item";
pub const CLEAR_CART_FAILED: &str = "Failed to clear cart";
pub const UPDATE_QUANTITY_FAILED: &str = "Failed to update quantity";

// =============================================================================
// Cart View
// =============================================================================

/// What the cart page renders: the last snapshot the server confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_quantity: i64,
    pub total_price: Money,
    /// False until the first successful fetch.
    pub loaded: bool,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rows(&self) -> &[CartItem] {
        &self.items
    }

    fn replace(&mut self, snapshot: CartSnapshot) {
        self.items = snapshot.items;
        self.total_quantity = snapshot.total_quantity;
        self.total_price = snapshot.total_price;
        self.loaded = true;
    }
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartMutation {
    DeleteItem,
    Clear,
    UpdateQuantity,
}

impl CartMutation {
    fn name(&self) -> &'static str {
        match self {
            CartMutation::DeleteItem => "cart/deleteItem",
            CartMutation::Clear => "cart/clear",
            CartMutation::UpdateQuantity => "cart/updateQuantity",
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            CartMutation::DeleteItem => DELETE_ITEM_FAILED,
            CartMutation::Clear => CLEAR_CART_FAILED,
            CartMutation::UpdateQuantity => UPDATE_QUANTITY_FAILED,
        }
    }

    fn success_default(&self) -> &'static str {
        match self {
            CartMutation::DeleteItem => "Item deleted from cart",
            CartMutation::Clear => "Cart cleared",
            CartMutation::UpdateQuantity => "Quantity updated",
        }
    }

    /// Local count change applied before the refetch.
    fn count_delta(&self) -> Option<CartEvent> {
        match self {
            CartMutation::DeleteItem => Some(CartEvent::Decrement),
            CartMutation::Clear => Some(CartEvent::Reset),
            CartMutation::UpdateQuantity => None,
        }
    }
}

// =============================================================================
// Cart Flow
// =============================================================================

pub struct CartFlow {
    api: CartApi,
    store: Arc<Store>,
    notifier: Arc<dyn Notifier>,
    view: RwLock<CartView>,
}

impl CartFlow {
    pub fn new(api: CartApi, store: Arc<Store>, notifier: Arc<dyn Notifier>) -> Self {
        CartFlow {
            api,
            store,
            notifier,
            view: RwLock::new(CartView::default()),
        }
    }

    pub fn view(&self) -> CartView {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the update-quantity control accepts `quantity`.
    pub fn can_submit_quantity(&self, quantity: i64) -> bool {
        quantity_submit_enabled(quantity)
    }

    /// `GET /cart`. On 200 the view and the badge count are replaced.
    pub async fn fetch(&self) -> FlowOutcome {
        match self.api.fetch().await {
            Ok(reply) if reply.is_confirmed() => {
                let count = reply.data.items.len();
                self.view
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .replace(reply.data);
                self.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(count)));
                debug!(count, "Cart fetched");
                FlowOutcome::Applied
            }
            Ok(reply) => {
                debug!(status = reply.status, "Cart fetch not confirmed, ignoring");
                FlowOutcome::Unconfirmed
            }
            Err(error) => {
                let message = failure_message(&error, FETCH_CART_FAILED);
                warn!(operation = "cart/fetch", error = %error, "Cart fetch failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }

    pub async fn delete_item(&self, product_id: &str) -> FlowOutcome {
        self.mutate(CartMutation::DeleteItem, product_id, self.api.delete_item(product_id))
            .await
    }

    pub async fn clear(&self) -> FlowOutcome {
        self.mutate(CartMutation::Clear, "", self.api.clear()).await
    }

    /// Sets the quantity of one line. Quantities below 1 are never sent.
    pub async fn update_quantity(&self, product_id: &str, quantity: i64) -> FlowOutcome {
        if !self.can_submit_quantity(quantity) {
            debug!(product_id = %product_id, quantity, "Quantity submit disabled");
            return FlowOutcome::Blocked(format!("Quantity must be at least 1, got {}", quantity));
        }

        self.mutate(
            CartMutation::UpdateQuantity,
            product_id,
            self.api.update_quantity(product_id, quantity),
        )
        .await
    }

    async fn mutate<Fut>(&self, mutation: CartMutation, product_id: &str, request: Fut) -> FlowOutcome
    where
        Fut: Future<Output = ClientResult<Reply<MessageResponse>>>,
    {
        match request.await {
            Ok(reply) if reply.is_confirmed() => {
                let message = reply
                    .data
                    .message
                    .unwrap_or_else(|| mutation.success_default().to_string());
                info!(operation = mutation.name(), product_id = %product_id, "Cart mutation confirmed");
                self.notifier.success(&message);

                if let Some(delta) = mutation.count_delta() {
                    self.store.dispatch(StoreEvent::Cart(delta));
                }

                self.fetch().await;
                FlowOutcome::Applied
            }
            Ok(reply) => {
                debug!(
                    operation = mutation.name(),
                    status = reply.status,
                    "Cart mutation not confirmed, skipping refetch"
                );
                FlowOutcome::Unconfirmed
            }
            Err(error) => {
                let message = failure_message(&error, mutation.fallback());
                warn!(
                    operation = mutation.name(),
                    product_id = %product_id,
                    status = ?error.status(),
                    error = %error,
                    "Cart mutation failed"
                );
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::notify::RecordingNotifier;
    use crate::testing::{scripted_client, ScriptedTransport};
    use serde_json::{json, Value};

    struct Harness {
        transport: Arc<ScriptedTransport>,
        store: Arc<Store>,
        notifier: Arc<RecordingNotifier>,
        flow: CartFlow,
    }

    fn harness() -> Harness {
        let (transport, http) = scripted_client();
        let store = Arc::new(Store::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let flow = CartFlow::new(CartApi::new(http), store.clone(), notifier.clone());
        Harness {
            transport,
            store,
            notifier,
            flow,
        }
    }

    fn cart_body(ids: &[&str]) -> Value {
        let items: Vec<Value> = ids
            .iter()
            .map(|id| json!({"productId": id, "name": format!("Item {}", id), "price": 10.5, "quantity": 1, "images": ["a.jpg"]}))
            .collect();
        json!({"cart": {"items": items, "totalQuantity": ids.len(), "totalPrice": 10.5 * ids.len() as f64}})
    }

    #[tokio::test]
    async fn test_fetch_sets_count_to_item_len() {
        let h = harness();
        h.transport.push_json(200, cart_body(&["p1", "p2", "p3"]));

        assert_eq!(h.flow.fetch().await, FlowOutcome::Applied);
        let view = h.flow.view();
        assert_eq!(h.store.cart().count, view.items.len());
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.total_quantity, 3);
        assert_eq!(view.total_price, Money::from_cents(3150));
        assert!(view.loaded);
    }

    #[tokio::test]
    async fn test_fetch_empty_cart_renders_no_rows() {
        let h = harness();
        h.transport.push_json(
            200,
            json!({"cart": {"items": [], "totalQuantity": 0, "totalPrice": 0}}),
        );

        h.flow.fetch().await;
        let view = h.flow.view();
        assert!(view.is_empty());
        assert!(view.rows().is_empty());
        assert!(view.loaded);
        assert_eq!(h.store.cart().count, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_view_and_notifies() {
        let h = harness();
        h.transport.push_json(200, cart_body(&["p1"]));
        h.flow.fetch().await;

        h.transport.push_empty(500);
        let outcome = h.flow.fetch().await;

        assert_eq!(outcome, FlowOutcome::Failed(FETCH_CART_FAILED.to_string()));
        assert_eq!(h.flow.view().items.len(), 1);
        assert_eq!(h.store.cart().count, 1);
        assert_eq!(h.notifier.messages(), vec![FETCH_CART_FAILED]);
    }

    #[test]
    fn test_quantity_gate_boundaries() {
        let h = harness();
        assert!(!h.flow.can_submit_quantity(-1));
        assert!(!h.flow.can_submit_quantity(0));
        assert!(h.flow.can_submit_quantity(1));
    }

    #[tokio::test]
    async fn test_update_quantity_below_one_sends_nothing() {
        let h = harness();

        for qty in [0, -1] {
            let outcome = h.flow.update_quantity("p1", qty).await;
            assert!(matches!(outcome, FlowOutcome::Blocked(_)));
        }
        assert!(h.transport.requests().is_empty());
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_delete_success_notifies_and_refetches() {
        let h = harness();
        h.transport.push_json(200, cart_body(&["p1", "p2"]));
        h.flow.fetch().await;

        h.transport.push_json(200, json!({"message": "Item deleted from cart"}));
        h.transport.push_json(200, cart_body(&["p2"]));

        let outcome = h.flow.delete_item("p1").await;

        assert_eq!(outcome, FlowOutcome::Applied);
        assert_eq!(h.notifier.messages(), vec!["Item deleted from cart"]);
        assert_eq!(
            h.transport.calls(),
            vec![
                (Method::Get, "/cart".to_string()),
                (Method::Delete, "/cart/products/p1".to_string()),
                (Method::Get, "/cart".to_string()),
            ]
        );
        assert_eq!(h.store.cart().count, 1);
        assert_eq!(h.flow.view().items[0].product_id, "p2");
    }

    #[tokio::test]
    async fn test_delete_applies_local_delta_before_refetch() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(2)));
        let mut rx = h.store.subscribe();

        h.transport.push_json(200, json!({"message": "Item deleted from cart"}));
        h.transport.push_json(200, cart_body(&["p2"]));
        h.flow.delete_item("p1").await;

        let counts: Vec<usize> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|change| match change {
                crate::store::StoreChange::Cart(state) => Some(state.count),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![1, 1]);
    }

    #[tokio::test]
    async fn test_delete_failure_with_message_does_not_refetch() {
        let h = harness();
        h.transport.push_json(200, cart_body(&["p1"]));
        h.flow.fetch().await;

        h.transport
            .push_json(400, json!({"message": "Failed to remove item from cart"}));
        let outcome = h.flow.delete_item("p1").await;

        assert_eq!(
            outcome,
            FlowOutcome::Failed("Failed to remove item from cart".to_string())
        );
        assert_eq!(h.notifier.messages(), vec!["Failed to remove item from cart"]);
        assert_eq!(h.transport.requests().len(), 2);
        assert_eq!(h.flow.view().items.len(), 1);
        assert_eq!(h.store.cart().count, 1);
    }

    #[tokio::test]
    async fn test_delete_failure_without_body_uses_fallback() {
        let h = harness();
        h.transport.push_network_error("connection reset");

        let outcome = h.flow.delete_item("p1").await;

        assert_eq!(outcome, FlowOutcome::Failed(DELETE_ITEM_FAILED.to_string()));
        assert_eq!(h.notifier.messages(), vec!["Failed to delete Item"]);
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_resets_count_and_refetches() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(4)));

        h.transport.push_json(200, json!({}));
        h.transport.push_json(200, cart_body(&[]));
        let outcome = h.flow.clear().await;

        assert_eq!(outcome, FlowOutcome::Applied);
        assert_eq!(h.notifier.messages(), vec!["Cart cleared"]);
        assert_eq!(h.store.cart().count, 0);
        assert_eq!(
            h.transport.calls()[0],
            (Method::Delete, "/cart/clear".to_string())
        );
        assert!(h.flow.view().is_empty());
    }

    #[tokio::test]
    async fn test_clear_failure_uses_fallback() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(4)));

        h.transport.push_empty(500);
        let outcome = h.flow.clear().await;

        assert_eq!(outcome, FlowOutcome::Failed(CLEAR_CART_FAILED.to_string()));
        assert_eq!(h.notifier.messages(), vec!["Failed to clear cart"]);
        assert_eq!(h.transport.requests().len(), 1);
        assert_eq!(h.store.cart().count, 4);
    }

    #[tokio::test]
    async fn test_delete_with_dot_id_sends_nothing() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(2)));

        let outcome = h.flow.delete_item("..").await;

        assert_eq!(outcome, FlowOutcome::Failed(DELETE_ITEM_FAILED.to_string()));
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.store.cart().count, 2);
    }

    #[tokio::test]
    async fn test_update_quantity_refetches_without_delta() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(2)));
        let mut rx = h.store.subscribe();

        h.transport.push_json(200, json!({"message": "Cart updated"}));
        h.transport.push_json(200, cart_body(&["p1", "p2"]));
        let outcome = h.flow.update_quantity("p1", 5).await;

        assert_eq!(outcome, FlowOutcome::Applied);
        assert_eq!(h.notifier.messages(), vec!["Cart updated"]);
        // Only the refetch touches the count.
        let mut cart_changes = 0;
        while let Ok(change) = rx.try_recv() {
            if matches!(change, crate::store::StoreChange::Cart(_)) {
                cart_changes += 1;
            }
        }
        assert_eq!(cart_changes, 1);
    }

    #[tokio::test]
    async fn test_update_quantity_failure_uses_fallback() {
        let h = harness();
        h.transport.push_empty(422);

        let outcome = h.flow.update_quantity("p1", 2).await;
        assert_eq!(outcome, FlowOutcome::Failed(UPDATE_QUANTITY_FAILED.to_string()));
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_non_200_success_is_ignored() {
        let h = harness();
        h.store.dispatch(StoreEvent::Cart(CartEvent::SetCount(3)));

        h.transport.push_empty(204);
        let outcome = h.flow.delete_item("p1").await;

        assert_eq!(outcome, FlowOutcome::Unconfirmed);
        assert!(h.notifier.messages().is_empty());
        assert_eq!(h.store.cart().count, 3);
        assert_eq!(h.transport.requests().len(), 1);
    }
}
