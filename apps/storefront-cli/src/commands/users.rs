//! # Admin User Commands

use clap::Subcommand;
use storefront_client::{FlowOutcome, Storefront, UserTable};
use storefront_core::UserRole;

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List one page of users
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Change a user's role (user, seller, admin)
    Role {
        user_id: String,

        role: UserRole,

        /// Page to reload after the change
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

pub async fn run(storefront: &Storefront, command: UsersCommand) -> FlowOutcome {
    let flow = storefront.admin_users();

    let outcome = match command {
        UsersCommand::List { page } => flow.load(page).await,
        UsersCommand::Role {
            user_id,
            role,
            page,
        } => {
            // The reload after a confirmed change targets the loaded page.
            if let failed @ FlowOutcome::Failed(_) = flow.load(page).await {
                return failed;
            }
            flow.change_role(&user_id, role).await
        }
    };

    if outcome.is_applied() {
        print!("{}", render(&flow.table()));
    }
    outcome
}

fn render(table: &UserTable) -> String {
    let mut out = String::new();
    for user in &table.users {
        let role = user
            .user_role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = user.status.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "  {:<26} {:<16} {:<28} {:<8} {}\n",
            user.id, user.username, user.email, role, status
        ));
    }
    out.push_str(&format!("Page {} of {}\n", table.page, table.total_pages));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::User;

    #[test]
    fn test_render_table() {
        let mut user = User::new("u1", "alice", "alice@example.com");
        user.user_role = Some(UserRole::Seller);
        let table = UserTable {
            users: vec![user],
            page: 2,
            total_pages: 5,
        };

        let out = render(&table);
        assert!(out.contains("alice@example.com"));
        assert!(out.contains("seller"));
        assert!(out.ends_with("Page 2 of 5\n"));
    }
}
