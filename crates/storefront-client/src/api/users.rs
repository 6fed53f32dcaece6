//! # User Endpoints
//!
//! Signup for everyone, listing and role changes for admins.

use storefront_core::{ChangeRoleRequest, MessageResponse, SignupRequest, SignupResponse, UserPage, UserRole};
use tracing::debug;

use super::Reply;
use crate::error::ClientResult;
use crate::http::{ApiPath, HttpClient};

#[derive(Clone)]
pub struct UsersApi {
    http: HttpClient,
}

impl UsersApi {
    pub fn new(http: HttpClient) -> Self {
        UsersApi { http }
    }

    /// `POST /users/signup`
    ///
    /// The password is never logged.
    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<Reply<SignupResponse>> {
        debug!(username = %request.username, email = %request.email, "Signing up");
        Reply::decode(self.http.post_json("/users/signup", request).await?)
    }

    /// `GET /users?page=N`
    pub async fn list(&self, page: u32) -> ClientResult<Reply<UserPage>> {
        debug!(page, "Listing users");
        Reply::decode(self.http.get("/users", &[("page", page.to_string())]).await?)
    }

    /// `POST /users/ChangeRole/:id` with `{ newRole }`.
    pub async fn change_role(
        &self,
        user_id: &str,
        new_role: UserRole,
    ) -> ClientResult<Reply<MessageResponse>> {
        debug!(user_id = %user_id, role = %new_role, "Changing user role");
        let path = ApiPath::new("/users/ChangeRole").id(user_id)?;
        Reply::decode(self.http.post_json(path, &ChangeRoleRequest { new_role }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, RequestBody};
    use crate::testing::scripted_client;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_sends_page_query() {
        let (transport, http) = scripted_client();
        transport.push_json(
            200,
            json!({
                "users": [{"_id": "u1", "username": "alice", "email": "a@x.io", "userRole": "admin", "status": "active"}],
                "pagination": {"totalPages": 4}
            }),
        );

        let reply = UsersApi::new(http).list(2).await.unwrap();
        assert_eq!(reply.data.users[0].id, "u1");
        assert_eq!(reply.data.users[0].user_role, Some(UserRole::Admin));
        assert_eq!(reply.data.pagination.total_pages, 4);

        let sent = transport.requests();
        assert_eq!(sent[0].path, "/users");
        assert_eq!(sent[0].query, vec![("page".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn test_change_role_body() {
        let (transport, http) = scripted_client();
        transport.push_json(200, json!({"message": "Role updated"}));

        UsersApi::new(http)
            .change_role("u1", UserRole::Seller)
            .await
            .unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/users/ChangeRole/u1");
        assert_eq!(sent[0].body, RequestBody::Json(json!({"newRole": "seller"})));
    }
}
