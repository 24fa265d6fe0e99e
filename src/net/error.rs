//! Normalized error shape for every REST call.

use thiserror::Error;

/// Message used when a failed response carries no readable message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The API rejected the credential; the session has been invalidated.
    #[error("{0}")]
    Unauthorized(String),
    /// Any other non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("response error: {0}")]
    Decode(String),
    #[error("request error: {0}")]
    Encode(String),
}

impl ApiError {
    /// Human-readable message suitable for a form or toast.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(message) | Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
