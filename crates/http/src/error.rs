//! Client error types

use quill_core::{ConfigError, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Header value could not be encoded
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Persisting or clearing the credential pair failed
    #[error("Credential storage failed: {0}")]
    Storage(#[from] StoreError),

    /// Access token renewal failed; shared by every call that waited on it
    #[error("Session renewal failed: {0}")]
    Renewal(#[source] Arc<ClientError>),

    /// The call driving a renewal was dropped before the renewal finished
    #[error("Session renewal was abandoned before it completed")]
    RenewalAborted,

    /// No session is active
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Check if the session is gone and the user must sign in again
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_)
                | Self::Renewal(_)
                | Self::RenewalAborted
                | Self::NotAuthenticated
        )
    }

    /// Underlying error of a failed renewal, or `self`
    pub fn root(&self) -> &Self {
        match self {
            Self::Renewal(inner) => inner.root(),
            other => other,
        }
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self.root() {
            Self::AuthenticationFailed(_) | Self::NotAuthenticated => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::Request(_) => {
                "Could not reach the server. Please check the API connection.".to_string()
            }
            Self::BadRequest(message) => format!("The server rejected the request: {message}"),
            Self::Forbidden(_) => "You are not allowed to change this post.".to_string(),
            Self::NotFound(_) => "That post no longer exists.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
