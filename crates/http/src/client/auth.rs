//! Token endpoints

use super::PublicClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{TokenRefreshRequest, TokenRefreshResponse};
use quill_core::{CredentialPair, Credentials};

const TOKEN_PATH: &str = "/token/";
const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

/// Authentication endpoints for the public client
impl PublicClient {
    /// Exchange username and password for a credential pair
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for rejected credentials, or a transport
    /// or decode failure
    pub async fn obtain_token_pair(&self, credentials: &Credentials) -> Result<CredentialPair> {
        let request = ApiRequest::post(TOKEN_PATH).json(credentials)?;
        self.execute(request).await
    }

    /// Exchange a refresh token for a new access token
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the refresh token was rejected, or a
    /// transport or decode failure
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let request = ApiRequest::post(TOKEN_REFRESH_PATH).json(&TokenRefreshRequest {
            refresh: refresh_token.to_string(),
        })?;
        let response: TokenRefreshResponse = self.execute(request).await?;
        Ok(response.access)
    }
}
