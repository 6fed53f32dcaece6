//! # Admin User Table
//!
//! A paged list of users with a role picker per row. Role changes follow
//! the same refetch-after-mutation rule as the cart: a confirmed change
//! reloads the current page instead of editing the row in place.

use std::sync::{Arc, PoisonError, RwLock};

use storefront_core::{User, UserRole};
use tracing::{debug, info, warn};

use super::{failure_message, FlowOutcome};
use crate::api::UsersApi;
use crate::notify::Notifier;

pub const FETCH_USERS_FAILED: &str = "Failed to fetch users";
pub const CHANGE_ROLE_FAILED: &str = "Failed to update user role";
const ROLE_CHANGED: &str = "User role updated";

/// Rows and pager state of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTable {
    pub users: Vec<User>,
    /// 1-based.
    pub page: u32,
    pub total_pages: u32,
}

impl Default for UserTable {
    fn default() -> Self {
        UserTable {
            users: Vec::new(),
            page: 1,
            total_pages: 1,
        }
    }
}

impl UserTable {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub struct AdminUsersFlow {
    api: UsersApi,
    notifier: Arc<dyn Notifier>,
    table: RwLock<UserTable>,
}

impl AdminUsersFlow {
    pub fn new(api: UsersApi, notifier: Arc<dyn Notifier>) -> Self {
        AdminUsersFlow {
            api,
            notifier,
            table: RwLock::new(UserTable::default()),
        }
    }

    pub fn table(&self) -> UserTable {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads `page` (clamped to at least 1) and replaces the rows.
    pub async fn load(&self, page: u32) -> FlowOutcome {
        let page = page.max(1);

        match self.api.list(page).await {
            Ok(reply) => {
                let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
                table.users = reply.data.users;
                table.page = page;
                table.total_pages = reply.data.pagination.total_pages.max(1);
                debug!(page, total_pages = table.total_pages, rows = table.users.len(), "Users loaded");
                FlowOutcome::Applied
            }
            Err(error) => {
                let message = failure_message(&error, FETCH_USERS_FAILED);
                warn!(operation = "users/list", page, error = %error, "Loading users failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }

    pub async fn next_page(&self) -> FlowOutcome {
        let table = self.table();
        if !table.has_next() {
            return FlowOutcome::Blocked("Already on the last page".to_string());
        }
        self.load(table.page + 1).await
    }

    pub async fn previous_page(&self) -> FlowOutcome {
        let table = self.table();
        if !table.has_previous() {
            return FlowOutcome::Blocked("Already on the first page".to_string());
        }
        self.load(table.page - 1).await
    }

    /// Changes a user's role; on a `200` the current page is reloaded.
    pub async fn change_role(&self, user_id: &str, role: UserRole) -> FlowOutcome {
        match self.api.change_role(user_id, role).await {
            Ok(reply) if reply.is_confirmed() => {
                let message = reply.data.message.unwrap_or_else(|| ROLE_CHANGED.to_string());
                info!(user_id = %user_id, role = %role, "User role changed");
                self.notifier.success(&message);
                let page = self.table().page;
                self.load(page).await;
                FlowOutcome::Applied
            }
            Ok(reply) => {
                debug!(status = reply.status, "Role change not confirmed, skipping refetch");
                FlowOutcome::Unconfirmed
            }
            Err(error) => {
                let message = failure_message(&error, CHANGE_ROLE_FAILED);
                warn!(operation = "users/changeRole", user_id = %user_id, error = %error, "Role change failed");
                self.notifier.error(&message);
                FlowOutcome::Failed(message)
            }
        }
    }
}
