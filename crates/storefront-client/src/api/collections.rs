//! # Collection Endpoints
//!
//! Seller-side collections and product upload.
//!
//! ## Product Upload Form
//! ```text
//! POST /collections/:id/product   (multipart/form-data)
//!
//!   name, description, sku      text
//!   price, bonus                text, major units ("19.99")
//!   images                      one file part per image, 4 to 8 parts
//! ```

use storefront_core::forms::ValidProduct;
use storefront_core::{CollectionList, MessageResponse, NewCollection, COLLECTION_LIST_LIMIT};
use tracing::debug;

use super::Reply;
use crate::error::ClientResult;
use crate::http::{ApiPath, FilePart, HttpClient, MultipartForm};

#[derive(Clone)]
pub struct CollectionsApi {
    http: HttpClient,
}

impl CollectionsApi {
    pub fn new(http: HttpClient) -> Self {
        CollectionsApi { http }
    }

    /// `GET /collections?limit=100`
    pub async fn list(&self) -> ClientResult<Reply<CollectionList>> {
        debug!(limit = COLLECTION_LIST_LIMIT, "Listing collections");
        Reply::decode(
            self.http
                .get("/collections", &[("limit", COLLECTION_LIST_LIMIT.to_string())])
                .await?,
        )
    }

    /// `POST /collections`
    pub async fn create(&self, collection: &NewCollection) -> ClientResult<Reply<MessageResponse>> {
        debug!(name = %collection.name, "Creating collection");
        Reply::decode(self.http.post_json("/collections", collection).await?)
    }

    /// `POST /collections/:id/product` as multipart form data.
    pub async fn add_product(
        &self,
        collection_id: &str,
        product: &ValidProduct,
    ) -> ClientResult<Reply<MessageResponse>> {
        debug!(
            collection_id = %collection_id,
            sku = %product.sku,
            images = product.images.len(),
            "Adding product"
        );
        let path = ApiPath::new("/collections").id(collection_id)?.then("/product");
        Reply::decode(self.http.post_multipart(path, product_form(product)).await?)
    }
}

fn product_form(product: &ValidProduct) -> MultipartForm {
    let form = MultipartForm::new()
        .text("name", product.name.as_str())
        .text("description", product.description.as_str())
        .text("sku", product.sku.as_str())
        .text("price", product.price.to_major_string())
        .text("bonus", product.bonus.to_major_string());

    product.images.iter().fold(form, |form, image| {
        form.file(FilePart {
            field: "images".to_string(),
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            bytes: image.bytes.clone(),
        })
    })
}
