//! Shared REST request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API call goes through `ApiClient`: the stored credential is attached
//! as a bearer header, a `401` clears the credential and notifies whoever owns
//! the session, and all other failures are normalized into `ApiError`.
//!
//! DESIGN
//! ======
//! The pipeline never navigates. Session invalidation is signalled through a
//! single registered hook; the session owner decides what the UI does next.
//! Login/registration use `send_public`, which neither attaches the bearer
//! nor treats `401` as invalidation, so a bad password cannot end an
//! existing session.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, GENERIC_ERROR_MESSAGE};
use super::transport::{GlooTransport, HttpRequest, HttpResponse, Method, Transport};
use crate::auth::token_store::TokenStore;
use crate::config::AppConfig;

/// Callback fired after a `401` has cleared the credential.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
    store: TokenStore,
    transport: Arc<dyn Transport>,
    unauthorized: Arc<Mutex<Option<UnauthorizedHook>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, store: TokenStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            store,
            transport,
            unauthorized: Arc::new(Mutex::new(None)),
        }
    }

    /// Browser client: `localStorage` credential and `fetch` transport.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.api_base_url,
            TokenStore::browser(&config.token_storage_key),
            Arc::new(GlooTransport),
        )
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// Register the session owner's invalidation hook, replacing any previous one.
    pub fn set_unauthorized_hook(&self, hook: UnauthorizedHook) {
        *self.unauthorized.lock().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    pub fn clear_unauthorized_hook(&self) {
        self.unauthorized.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build_request(&self, method: Method, path: &str, body: Option<String>, auth: Auth) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if auth == Auth::Bearer {
            if let Some(token) = self.store.get() {
                headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
            }
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }

    /// Send through the authenticated pipeline.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on `401` (after clearing the credential), `Http` for
    /// other non-success statuses, `Network` when no response arrived.
    pub async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, body, Auth::Bearer);
        self.dispatch(request, Auth::Bearer).await
    }

    /// Send without the bearer header and without `401` invalidation.
    ///
    /// # Errors
    ///
    /// `Http` for any non-success status, `Network` when no response arrived.
    pub async fn send_public(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, body, Auth::Public);
        self.dispatch(request, Auth::Public).await
    }

    async fn dispatch(&self, request: HttpRequest, auth: Auth) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let message = error_message(&response.body);
        if response.status == 401 && auth == Auth::Bearer {
            log::warn!("{} {url} -> 401; invalidating session", method.as_str());
            self.invalidate();
            return Err(ApiError::Unauthorized(message));
        }
        log::debug!("{} {url} -> {}", method.as_str(), response.status);
        Err(ApiError::Http {
            status: response.status,
            message,
        })
    }

    fn invalidate(&self) {
        self.store.clear();
        let hook = self.unauthorized.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; `Decode` when the body is not the expected JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        parse_json(&self.send(Method::Get, path, None).await?)
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; `Encode`/`Decode` for JSON failures.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        parse_json(&self.send(Method::Post, path, Some(encode(body)?)).await?)
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; `Encode`/`Decode` for JSON failures.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        parse_json(&self.send(Method::Put, path, Some(encode(body)?)).await?)
    }

    /// `PATCH` with no body, parsing a JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; `Decode` when the body is not the expected JSON.
    pub async fn patch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        parse_json(&self.send(Method::Patch, path, None).await?)
    }

    /// `POST` whose response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError> {
        let body = body.map(encode).transpose()?;
        self.send(Method::Post, path, body).await.map(|_| ())
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None).await.map(|_| ())
    }

    /// Unauthenticated `POST` used for credential exchange.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_public`]; `Encode`/`Decode` for JSON failures.
    pub async fn post_public_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        parse_json(&self.send_public(Method::Post, path, Some(encode(body)?)).await?)
    }

    /// Unauthenticated `POST` whose response body is ignored.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_public`]; `Encode` when `body` does not serialize.
    pub async fn post_public_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_public(Method::Post, path, Some(encode(body)?))
            .await
            .map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

pub(crate) fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Human-readable message from an error body: `message`, then `error`.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return GENERIC_ERROR_MESSAGE.to_owned();
    };
    ["message", "error"]
        .iter()
        .find_map(|field| {
            value
                .get(field)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
        })
        .map_or_else(|| GENERIC_ERROR_MESSAGE.to_owned(), str::to_owned)
}
