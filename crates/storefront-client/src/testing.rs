//! Test doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, ApiResponse, HttpClient, Method, Transport};

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ClientResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(ApiResponse::new(status, Some(body)));
    }

    pub fn push_empty(&self, status: u16) {
        self.push(ApiResponse::new(status, None));
    }

    /// Scripts a failure where no response arrives at all.
    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Transport(message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(method, path)` of every request sent so far.
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|request| (request.method, request.path.to_string()))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".into())))
    }
}

/// An `HttpClient` over a fresh scripted transport.
pub fn scripted_client() -> (Arc<ScriptedTransport>, HttpClient) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = HttpClient::new(transport.clone());
    (transport, client)
}
