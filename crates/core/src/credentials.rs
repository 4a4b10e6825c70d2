//! Credential types exchanged with the token endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-lived / long-lived token pair issued by `POST /token/`
///
/// Persisted as a single JSON object (`{"access": .., "refresh": ..}`) so a
/// stored value round-trips with what the backend returns.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// Short-lived token attached to every authenticated call
    pub access: String,
    /// Long-lived token used only to obtain a new access token
    pub refresh: String,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Copy of this pair with the access token replaced after a renewal
    #[must_use]
    pub fn with_access(&self, access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: self.refresh.clone(),
        }
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access", &redact(&self.access))
            .field("refresh", &redact(&self.refresh))
            .finish()
    }
}

/// Username/password submitted by the login form
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{prefix}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_field_names() {
        let pair = CredentialPair::new("a.b.c", "d.e.f");
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"access": "a.b.c", "refresh": "d.e.f"}));
    }

    #[test]
    fn with_access_keeps_refresh_token() {
        let pair = CredentialPair::new("old", "long-lived");
        let renewed = pair.with_access("new");
        assert_eq!(renewed.access, "new");
        assert_eq!(renewed.refresh, "long-lived");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = Credentials::new("alice", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));

        let pair = CredentialPair::new("access-token-value", "refresh-token-value");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("access-token-value"));
    }
}
