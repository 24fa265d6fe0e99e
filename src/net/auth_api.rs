//! Auth endpoints: credential exchange, registration, refresh, and `me`.

#[cfg(test)]
#[path = "auth_api_test.rs"]
mod auth_api_test;

use serde::{Deserialize, Serialize};

use super::client::{ApiClient, parse_json};
use super::error::ApiError;
use super::transport::Method;
use crate::auth::claims::UserIdentity;

pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const REGISTER_PATH: &str = "/auth/register";
pub(crate) const REFRESH_PATH: &str = "/auth/refresh";
pub(crate) const ME_PATH: &str = "/auth/me";

#[derive(Clone, Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Some deployments omit this; the identity then comes from the token claims.
    #[serde(default)]
    pub user: Option<UserIdentity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange email + password for a credential.
    ///
    /// # Errors
    ///
    /// `Http` with the server's message on rejected credentials; never
    /// invalidates an existing session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.client
            .post_public_json(LOGIN_PATH, &Credentials { email, password })
            .await
    }

    /// # Errors
    ///
    /// `Http` with the server's message when registration is refused.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.client
            .post_public_empty(REGISTER_PATH, &Credentials { email, password })
            .await
    }

    /// Trade the current credential for a fresh one.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the current credential is no longer accepted.
    pub async fn refresh(&self) -> Result<RefreshResponse, ApiError> {
        parse_json(&self.client.send(Method::Post, REFRESH_PATH, None).await?)
    }

    /// # Errors
    ///
    /// `Unauthorized` when the current credential is no longer accepted.
    pub async fn me(&self) -> Result<UserIdentity, ApiError> {
        self.client.get_json(ME_PATH).await
    }
}
