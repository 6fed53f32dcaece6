//! # HTTP Layer
//!
//! A small request/response model on top of a pluggable [`Transport`].
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartApi::delete_item("p1")                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HttpClient::send(ApiRequest { DELETE, ["cart","products","p1"] })      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transport::send ──► ApiResponse { status, body }   (any HTTP status)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx      ──► Ok(ApiResponse)                                           │
//! │  non-2xx  ──► Err(Status { status, body: ErrorBody if JSON object })    │
//! │  no reply ──► Err(Transport)                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths are kept as segments. An id is always exactly one segment: the
//! transport percent-encodes `/`, `?` and `#` inside it, and ids that URL
//! normalization would drop (`""`, `.`, `..`) are refused before sending.
//!
//! [`ReqwestTransport`] is the production transport. Tests swap in a
//! scripted one.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use storefront_core::ErrorBody;
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request / Response Model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A multipart form: text fields in order, then file parts in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Value of the first text field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn into_reqwest(self) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// A request path relative to the base URL, as unencoded segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    /// A fixed path such as `/cart/products`. Empty segments are skipped.
    pub fn new(literal: &str) -> Self {
        ApiPath {
            segments: literal
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Appends a caller-supplied id as a single segment.
    pub fn id(mut self, id: &str) -> ClientResult<Self> {
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::InvalidId(id.to_string()));
        }
        self.segments.push(id.to_string());
        Ok(self)
    }

    /// Appends fixed segments after an id, e.g. `/product`.
    pub fn then(mut self, literal: &str) -> Self {
        self.segments.extend(ApiPath::new(literal).segments);
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for ApiPath {
    fn from(literal: &str) -> Self {
        ApiPath::new(literal)
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

impl PartialEq<&str> for ApiPath {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: ApiPath,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<ApiPath>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ClientResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// A raw HTTP reply.
///
/// `body` is `None` when the reply was empty or not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        ApiResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body. A missing body decodes like `{}`.
    pub fn decode<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let value = self
            .body
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        Ok(serde_json::from_value(value)?)
    }

    /// The body as an [`ErrorBody`], only when it is a JSON object.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match &self.body {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Sends one request and returns whatever the server answered.
///
/// Implementations return `Ok` for every HTTP status and `Err` only when
/// no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

// =============================================================================
// Reqwest Transport
// =============================================================================

/// Production transport backed by `reqwest` with a cookie store.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in &settings.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ClientError::InvalidConfig(format!("header {}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidConfig(format!("header {}: {}", key, e)))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(ReqwestTransport {
            client,
            base_url: Url::parse(&settings.base_url)?,
        })
    }

    /// Appends `path` to the base URL, keeping the base path.
    fn url_for(&self, path: &ApiPath, query: &[(String, String)]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(path.segments());
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.url_for(&request.path, &request.query)?;

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(ApiResponse { status, body })
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Cheap-to-clone handle that turns non-2xx replies into errors.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        HttpClient { transport }
    }

    pub async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let method = request.method.as_str();
        let path = request.path.to_string();
        debug!(method, path = %path, "Sending request");

        let response = self.transport.send(request).await?;
        debug!(method, path = %path, status = response.status, "Received response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status {
                status: response.status,
                body: response.error_body(),
            })
        }
    }

    pub async fn get(
        &self,
        path: impl Into<ApiPath>,
        query: &[(&str, String)],
    ) -> ClientResult<ApiResponse> {
        let mut request = ApiRequest::new(Method::Get, path);
        for (key, value) in query {
            request = request.query(*key, value);
        }
        self.send(request).await
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: impl Into<ApiPath>,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Post, path).json(body)?).await
    }

    pub async fn patch_json<B: Serialize>(
        &self,
        path: impl Into<ApiPath>,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Patch, path).json(body)?).await
    }

    pub async fn delete(&self, path: impl Into<ApiPath>) -> ClientResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    pub async fn post_multipart(
        &self,
        path: impl Into<ApiPath>,
        form: MultipartForm,
    ) -> ClientResult<ApiResponse> {
        self.send(ApiRequest::new(Method::Post, path).multipart(form)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_non_2xx_becomes_status_error_with_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(404, json!({"message": "Product not found in cart"}));
        let client = HttpClient::new(transport.clone());

        let err = client.delete("/cart/products/p1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), Some("Product not found in cart"));

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/cart/products/p1");
    }

    #[tokio::test]
    async fn test_unstructured_error_body_is_dropped() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(ApiResponse::new(500, Some(json!("Internal Server Error"))));
        transport.push(ApiResponse::new(500, None));
        let client = HttpClient::new(transport);

        let err = client.get("/cart", &[]).await.unwrap_err();
        assert!(err.error_body().is_none());
        let err = client.get("/cart", &[]).await.unwrap_err();
        assert!(err.error_body().is_none());
    }

    #[tokio::test]
    async fn test_2xx_passes_through() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(201, json!({"message": "created"}));
        let client = HttpClient::new(transport.clone());

        let response = client
            .post_json("/collections", &json!({"name": "Summer"}))
            .await
            .unwrap();
        assert_eq!(response.status, 201);

        let sent = transport.requests();
        assert_eq!(sent[0].body, RequestBody::Json(json!({"name": "Summer"})));
    }

    #[test]
    fn test_decode_missing_body_as_empty_object() {
        #[derive(serde::Deserialize)]
        struct Message {
            message: Option<String>,
        }

        let response = ApiResponse::new(204, None);
        let decoded: Message = response.decode().unwrap();
        assert_eq!(decoded.message, None);
    }

    #[test]
    fn test_url_for_keeps_base_path_and_query() {
        let settings = ApiSettings {
            base_url: "http://localhost:5000/api/".to_string(),
            ..Default::default()
        };
        let transport = ReqwestTransport::new(&settings).unwrap();

        let url = transport
            .url_for(&ApiPath::new("/users"), &[("page".to_string(), "2".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/users?page=2");
    }

    #[test]
    fn test_url_for_works_without_base_path() {
        let settings = ApiSettings {
            base_url: "http://localhost:5000".to_string(),
            ..Default::default()
        };
        let transport = ReqwestTransport::new(&settings).unwrap();

        let url = transport.url_for(&ApiPath::new("/cart/clear"), &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/cart/clear");
    }

    #[test]
    fn test_ids_stay_one_encoded_segment() {
        let transport = ReqwestTransport::new(&ApiSettings::default()).unwrap();

        let path = ApiPath::new("/cart/products").id("../clear").unwrap();
        let url = transport.url_for(&path, &[]).unwrap();
        assert_eq!(url.path(), "/api/cart/products/..%2Fclear");

        let path = ApiPath::new("/cart/products").id("a?b#c").unwrap();
        let url = transport.url_for(&path, &[]).unwrap();
        assert_eq!(url.path(), "/api/cart/products/a%3Fb%23c");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let path = ApiPath::new("/collections").id("c 1").unwrap().then("/product");
        let url = transport.url_for(&path, &[]).unwrap();
        assert_eq!(url.path(), "/api/collections/c%201/product");
    }

    #[test]
    fn test_dot_and_empty_ids_are_refused() {
        for id in ["", ".", ".."] {
            let err = ApiPath::new("/cart/products").id(id).unwrap_err();
            assert!(matches!(err, ClientError::InvalidId(_)));
        }
    }

    #[test]
    fn test_multipart_builder() {
        let form = MultipartForm::new().text("name", "Lamp").file(FilePart {
            field: "images".into(),
            file_name: "a.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        });
        assert_eq!(form.field("name"), Some("Lamp"));
        assert_eq!(form.field("sku"), None);
        assert_eq!(form.files.len(), 1);
    }
}
