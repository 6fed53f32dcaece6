//! # Cart Endpoints

use storefront_core::{CartEnvelope, CartSnapshot, MessageResponse, QuantityUpdateRequest};
use tracing::debug;

use super::Reply;
use crate::error::ClientResult;
use crate::http::{ApiPath, HttpClient};

/// Wrapper for the `/cart` endpoints.
///
/// ## Usage
/// ```rust,ignore
/// let cart = api.cart();
/// let reply = cart.fetch().await?;
/// println!("{} items", reply.data.items.len());
/// ```
#[derive(Clone)]
pub struct CartApi {
    http: HttpClient,
}

impl CartApi {
    pub fn new(http: HttpClient) -> Self {
        CartApi { http }
    }

    /// `GET /cart`, unwrapping the `{ cart: ... }` envelope.
    pub async fn fetch(&self) -> ClientResult<Reply<CartSnapshot>> {
        debug!("Fetching cart");
        let reply: Reply<CartEnvelope> = Reply::decode(self.http.get("/cart", &[]).await?)?;
        Ok(Reply {
            status: reply.status,
            data: reply.data.cart,
        })
    }

    /// `DELETE /cart/products/:id`
    pub async fn delete_item(&self, product_id: &str) -> ClientResult<Reply<MessageResponse>> {
        debug!(product_id = %product_id, "Deleting cart item");
        let path = ApiPath::new("/cart/products").id(product_id)?;
        Reply::decode(self.http.delete(path).await?)
    }

    /// `DELETE /cart/clear`
    pub async fn clear(&self) -> ClientResult<Reply<MessageResponse>> {
        debug!("Clearing cart");
        Reply::decode(self.http.delete("/cart/clear").await?)
    }

    /// `PATCH /cart/products/:id` with `{ items: [{ productId, quantity }] }`.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: i64,
    ) -> ClientResult<Reply<MessageResponse>> {
        debug!(product_id = %product_id, quantity, "Updating cart quantity");
        let path = ApiPath::new("/cart/products").id(product_id)?;
        let body = QuantityUpdateRequest::single(product_id, quantity);
        Reply::decode(self.http.patch_json(path, &body).await?)
    }
}
