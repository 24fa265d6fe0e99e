//! Shared fixtures for unit tests: unsigned tokens and a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64ct::{Base64UrlUnpadded, Encoding};

use crate::auth::token_store::TokenStore;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{HttpRequest, HttpResponse, Transport};

pub(crate) const BASE_URL: &str = "http://api.test/api";

/// Three-segment token around an arbitrary payload.
pub(crate) fn token_with_payload(payload: &[u8]) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    format!("{header}.{}.signature", Base64UrlUnpadded::encode_string(payload))
}

pub(crate) fn unsigned_token(claims: &serde_json::Value) -> String {
    token_with_payload(claims.to_string().as_bytes())
}

pub(crate) fn token_expiring_at(sub: &str, exp: i64) -> String {
    unsigned_token(&serde_json::json!({
        "sub": sub,
        "email": format!("{sub}@example.com"),
        "name": "Test User",
        "role": "user",
        "exp": exp,
    }))
}

/// Transport that replays queued responses in order and records requests.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn respond(&self, status: u16, body: &serde_json::Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_owned(),
        }));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_owned())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_owned())))
    }
}

/// Client over a fresh in-memory store and the given scripted transport.
pub(crate) fn mock_client(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(BASE_URL, TokenStore::in_memory("token"), transport.clone())
}
