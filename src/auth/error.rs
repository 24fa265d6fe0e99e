use thiserror::Error;

use crate::net::error::{ApiError, GENERIC_ERROR_MESSAGE};

/// Message shown when a login fails without a usable server message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The server refused the credentials and said why.
    #[error("{0}")]
    Rejected(String),
    /// Transport or server failure with nothing useful to show.
    #[error("Login failed")]
    Failed,
    /// The issued credential could not be decoded or is already expired.
    #[error("Received an invalid session token")]
    InvalidToken,
    /// The session owner was torn down before the exchange resolved.
    #[error("login cancelled")]
    Cancelled,
}

impl AuthError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { message, .. } | ApiError::Unauthorized(message)
                if message != GENERIC_ERROR_MESSAGE =>
            {
                Self::Rejected(message)
            }
            _ => Self::Failed,
        }
    }
}
