//! # Async Action Runner
//!
//! Wraps one async operation so the store observes it as
//! `Pending` followed by exactly one of `Fulfilled` or `Rejected`.
//!
//! ## Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  runner.run("users/signup", to_event, api.signup(&request))             │
//! │       │                                                                 │
//! │       ├── 1. ActionMeta { operation, request_id = v4 }                  │
//! │       ├── 2. dispatch(to_event(Pending))     before the future is polled│
//! │       ├── 3. await the operation                                        │
//! │       └── 4. Ok(v)  ──► dispatch(to_event(Fulfilled(v)))   ──► Ok(v)    │
//! │              Err(e) ──► dispatch(to_event(Rejected(body))) ──► Err(..)  │
//! │                                                                         │
//! │  body = e.error_body() (the server's JSON reply), otherwise None        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Futures are lazy, so building the operation future before calling
//! `run` sends nothing; the request starts only after `Pending` is applied.

use std::future::Future;
use std::sync::Arc;

use storefront_core::{ActionMeta, ErrorBody, Lifecycle};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::store::{Store, StoreEvent};

/// A rejected invocation: what the store saw plus the underlying error.
#[derive(Debug)]
pub struct Rejection {
    pub meta: ActionMeta,
    /// The payload dispatched with `Rejected`.
    pub payload: Option<ErrorBody>,
    pub error: ClientError,
}

#[derive(Clone)]
pub struct AsyncActionRunner {
    store: Arc<Store>,
}

impl AsyncActionRunner {
    pub fn new(store: Arc<Store>) -> Self {
        AsyncActionRunner { store }
    }

    /// Runs `operation`, dispatching its lifecycle through `to_event`.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &str,
        to_event: F,
        future: Fut,
    ) -> Result<T, Rejection>
    where
        T: Clone,
        F: Fn(Lifecycle<T>) -> StoreEvent,
        Fut: Future<Output = ClientResult<T>>,
    {
        let meta = ActionMeta::new(operation);
        debug!(operation = %meta.operation, request_id = %meta.request_id, "Action pending");
        self.store.dispatch(to_event(Lifecycle::Pending));

        match future.await {
            Ok(value) => {
                debug!(operation = %meta.operation, request_id = %meta.request_id, "Action fulfilled");
                self.store
                    .dispatch(to_event(Lifecycle::Fulfilled(value.clone())));
                Ok(value)
            }
            Err(error) => {
                let payload = error.error_body().cloned();
                warn!(
                    operation = %meta.operation,
                    request_id = %meta.request_id,
                    status = ?error.status(),
                    error = %error,
                    "Action rejected"
                );
                self.store
                    .dispatch(to_event(Lifecycle::Rejected(payload.clone())));
                Err(Rejection {
                    meta,
                    payload,
                    error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreChange;
    use std::sync::atomic::{AtomicBool, Ordering};
    use storefront_core::state::UserEvent;
    use storefront_core::{User, UNKNOWN_ERROR_MESSAGE};

    fn signup_event(lifecycle: Lifecycle<User>) -> StoreEvent {
        StoreEvent::User(UserEvent::Signup(lifecycle))
    }

    fn user_changes(rx: &mut tokio::sync::broadcast::Receiver<StoreChange>) -> Vec<storefront_core::state::UserState> {
        let mut out = Vec::new();
        while let Ok(change) = rx.try_recv() {
            if let StoreChange::User(state) = change {
                out.push(state);
            }
        }
        out
    }

    #[tokio::test]
    async fn test_pending_is_dispatched_before_operation_runs() {
        let store = Arc::new(Store::new());
        let runner = AsyncActionRunner::new(store.clone());
        let observed_loading = Arc::new(AtomicBool::new(false));

        let probe_store = store.clone();
        let probe = observed_loading.clone();
        let result = runner
            .run("users/signup", signup_event, async move {
                probe.store(probe_store.user().loading, Ordering::SeqCst);
                Ok(User::new("u1", "alice", "alice@example.com"))
            })
            .await;

        assert!(observed_loading.load(Ordering::SeqCst));
        assert_eq!(result.unwrap().id, "u1");
        let state = store.user();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.user.map(|u| u.username), Some("alice".to_string()));
    }

    #[tokio::test]
    async fn test_exactly_two_events_on_success() {
        let store = Arc::new(Store::new());
        let mut rx = store.subscribe();
        let runner = AsyncActionRunner::new(store.clone());

        runner
            .run("users/signup", signup_event, async {
                Ok(User::new("u1", "alice", "alice@example.com"))
            })
            .await
            .unwrap();

        let changes = user_changes(&mut rx);
        assert_eq!(changes.len(), 2);
        assert!(changes[0].loading);
        assert!(!changes[1].loading);
    }

    #[tokio::test]
    async fn test_structured_rejection_carries_payload() {
        let store = Arc::new(Store::new());
        let mut rx = store.subscribe();
        let runner = AsyncActionRunner::new(store.clone());

        let rejection = runner
            .run("users/signup", signup_event, async {
                Err::<User, _>(ClientError::Status {
                    status: 409,
                    body: Some(ErrorBody::with_message("Email already registered")),
                })
            })
            .await
            .unwrap_err();

        assert_eq!(rejection.meta.operation, "users/signup");
        assert_eq!(
            rejection.payload.as_ref().and_then(ErrorBody::message),
            Some("Email already registered")
        );
        assert_eq!(store.user().error.as_deref(), Some("Email already registered"));
        assert_eq!(user_changes(&mut rx).len(), 2);
    }

    #[tokio::test]
    async fn test_unstructured_rejection_has_no_payload() {
        let store = Arc::new(Store::new());
        let runner = AsyncActionRunner::new(store.clone());

        let rejection = runner
            .run("users/signup", signup_event, async {
                Err::<User, _>(ClientError::Transport("connection refused".into()))
            })
            .await
            .unwrap_err();

        assert!(rejection.payload.is_none());
        assert_eq!(store.user().error.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
        assert!(!store.user().loading);
    }

    #[tokio::test]
    async fn test_each_invocation_gets_its_own_request_id() {
        let store = Arc::new(Store::new());
        let runner = AsyncActionRunner::new(store);

        let fail = || async { Err::<User, _>(ClientError::Transport("down".into())) };
        let a = runner.run("users/signup", signup_event, fail()).await.unwrap_err();
        let b = runner.run("users/signup", signup_event, fail()).await.unwrap_err();
        assert_ne!(a.meta.request_id, b.meta.request_id);
    }
}
