//! Identity extraction from access-token claims
//!
//! Tokens are decoded without signature verification. The backend verifies
//! every token it receives; the client only reads the claims it needs to show
//! who is signed in.

use crate::error::IdentityError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Signed-in user as shown by the views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

/// Claims read from the payload segment of an access token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Display name added by the backend's token serializer
    pub username: Option<String>,
    /// Expiration (seconds since the epoch)
    pub exp: Option<i64>,
    /// Issued at (seconds since the epoch)
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Expiration as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Issue time as a UTC timestamp
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }
}

/// Decode the claims of a JWT without verifying its signature
pub fn decode_claims(token: &str) -> Result<TokenClaims, IdentityError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(IdentityError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Derive the signed-in identity from an access token
///
/// Returns `None` for undecodable tokens and for tokens without a `username`
/// claim; the reason is logged.
pub fn extract_identity(token: &str) -> Option<Identity> {
    match decode_claims(token) {
        Ok(TokenClaims {
            username: Some(username),
            ..
        }) if !username.is_empty() => Some(Identity { username }),
        Ok(_) => {
            warn!("Access token does not contain a username claim");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to decode access token");
            None
        }
    }
}
