//! # Signup Flow
//!
//! Drives the signup form through the async action runner, so the User
//! slice sees `Pending` and then `Fulfilled` or `Rejected`.
//!
//! ## Form States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Idle ──submit──► Pending ──200──► Fulfilled   (notify, form reset)     │
//! │   ▲     (button    │                                                    │
//! │   │    disabled,   └──fail──► Rejected         (notify, form kept)      │
//! │   │  "Signing up...")                                                   │
//! │   └──────────────── any terminal state accepts another submit           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::forms::SignupForm;
use storefront_core::lifecycle::rejection_message;
use storefront_core::state::UserEvent;
use storefront_core::{Lifecycle, SignupResponse};
use tracing::{debug, info};

use super::FlowOutcome;
use crate::api::UsersApi;
use crate::notify::Notifier;
use crate::runner::AsyncActionRunner;
use crate::store::{Store, StoreEvent};

pub const SIGNUP_OPERATION: &str = "users/signup";
pub const SIGNUP_SUCCEEDED: &str = "Signup successful";
pub const SIGNUP_FAILED: &str = "Signup failed. Please try again.";

const LABEL_IDLE: &str = "Sign Up";
const LABEL_PENDING: &str = "Signing up...";

pub struct SignupFlow {
    api: UsersApi,
    runner: AsyncActionRunner,
    store: Arc<Store>,
    notifier: Arc<dyn Notifier>,
    form: RwLock<SignupForm>,
}

impl SignupFlow {
    pub fn new(api: UsersApi, store: Arc<Store>, notifier: Arc<dyn Notifier>) -> Self {
        SignupFlow {
            api,
            runner: AsyncActionRunner::new(Arc::clone(&store)),
            store,
            notifier,
            form: RwLock::new(SignupForm::default()),
        }
    }

    pub fn form(&self) -> SignupForm {
        self.form
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the field values, as typing into the form would.
    pub fn set_form(&self, form: SignupForm) {
        *self.form.write().unwrap_or_else(PoisonError::into_inner) = form;
    }

    /// Submit is disabled while a signup is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.store.user().loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_enabled() {
            LABEL_IDLE
        } else {
            LABEL_PENDING
        }
    }

    pub async fn submit(&self) -> FlowOutcome {
        if !self.submit_enabled() {
            debug!("Signup already in flight");
            return FlowOutcome::Blocked("Signup already in progress".to_string());
        }

        let request = match self.form().validate() {
            Ok(request) => request,
            Err(errors) => {
                debug!(errors = %errors, "Signup form invalid");
                return FlowOutcome::Invalid(errors);
            }
        };

        let result = self
            .runner
            .run(
                SIGNUP_OPERATION,
                |lifecycle: Lifecycle<SignupResponse>| {
                    StoreEvent::User(UserEvent::Signup(lifecycle.map(|response| response.user)))
                },
                async { self.api.signup(&request).await.map(|reply| reply.data) },
            )
            .await;

        match result {
            Ok(response) => {
                info!(username = %response.user.username, "Signup succeeded");
                let message = response
                    .message
                    .unwrap_or_else(|| SIGNUP_SUCCEEDED.to_string());
                self.notifier.success(&message);
                self.form
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .reset();
                FlowOutcome::Applied
            }
            Err(rejection) => {
                let message = rejection_message(rejection.payload.as_ref(), SIGNUP_FAILED);
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
