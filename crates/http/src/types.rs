//! Wire types for the token endpoints
//!
//! `POST /token/` takes [`quill_core::Credentials`] and answers with a
//! [`quill_core::CredentialPair`]; only the refresh exchange needs its own types.

use serde::{Deserialize, Serialize};

/// Body of `POST /token/refresh/`
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// Response of `POST /token/refresh/`
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}
