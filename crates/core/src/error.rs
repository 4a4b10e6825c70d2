//! Error types shared across the Quill crates

use thiserror::Error;

/// Failure reading or writing the persisted credential pair
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored credentials are malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an unavailable-storage error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Failure decoding the claims of an access token
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Token is not a three-part JWT")]
    Malformed,

    #[error("Token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token payload is not a valid claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Invalid or missing API configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL is not configured (set {0})")]
    MissingBaseUrl(&'static str),

    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to read configuration: {0}")]
    Source(#[from] ::config::ConfigError),
}
