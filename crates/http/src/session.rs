//! Session manager
//!
//! Owns the credential pair and the identity derived from it. Login and
//! renewal go through the public channel; the authenticated channel reads the
//! pair through [`CredentialSource`]. Status changes are published on a
//! `watch` channel so views can re-render.

use crate::client::PublicClient;
use crate::error::{ClientError, Result};
use crate::middleware::CredentialSource;
use async_trait::async_trait;
use quill_core::navigation::{DASHBOARD_PATH, LOGIN_PATH};
use quill_core::{
    CredentialPair, CredentialStore, Credentials, Identity, Navigator, extract_identity,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// Authentication status as seen by the views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    pair: Option<CredentialPair>,
    identity: Option<Identity>,
}

impl SessionState {
    fn from_pair(pair: Option<CredentialPair>) -> Self {
        let identity = pair.as_ref().and_then(|pair| extract_identity(&pair.access));
        Self { pair, identity }
    }

    fn status(&self) -> SessionStatus {
        match (&self.pair, &self.identity) {
            (Some(_), Some(identity)) => SessionStatus::Authenticated(identity.clone()),
            _ => SessionStatus::Unauthenticated,
        }
    }
}

/// Login, logout and renewal for one user session
pub struct SessionManager {
    client: PublicClient,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
    status: watch::Sender<SessionStatus>,
}

impl SessionManager {
    /// Create a session manager, restoring any persisted credential pair
    pub fn new(
        client: PublicClient,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let pair = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read stored credentials, starting signed out");
            None
        });

        let state = SessionState::from_pair(pair);
        let status = state.status();
        match &status {
            SessionStatus::Authenticated(identity) => {
                info!(username = %identity.username, "Restored session");
            }
            SessionStatus::Unauthenticated if state.pair.is_some() => {
                warn!("Stored access token carries no identity");
            }
            SessionStatus::Unauthenticated => debug!("No stored session"),
        }

        let (status, _) = watch::channel(status);
        Self {
            client,
            store,
            navigator,
            state: RwLock::new(state),
            status,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exchange username and password for a credential pair
    ///
    /// On success the pair is persisted, the status is published and the view
    /// moves to the dashboard. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection, a transport failure, a store failure,
    /// or `AuthenticationFailed` when the issued token carries no username.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity> {
        info!(username = %credentials.username, "Logging in");
        let pair = self.client.obtain_token_pair(credentials).await?;

        let Some(identity) = extract_identity(&pair.access) else {
            return Err(ClientError::AuthenticationFailed(
                "issued access token carries no username".to_string(),
            ));
        };

        {
            let mut state = self.write_state();
            self.store.save(&pair)?;
            *state = SessionState {
                pair: Some(pair),
                identity: Some(identity.clone()),
            };
        }

        info!(username = %identity.username, "Logged in");
        self.publish();
        self.navigator.goto(DASHBOARD_PATH);
        Ok(identity)
    }

    /// End the session and return to the login page
    ///
    /// Safe to call when already signed out.
    pub fn logout(&self) {
        let previous = {
            let mut state = self.write_state();
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Could not clear stored credentials");
            }
            std::mem::take(&mut *state)
        };

        if let Some(identity) = previous.identity {
            info!(username = %identity.username, "Logged out");
        }
        self.publish();
        self.navigator.goto(LOGIN_PATH);
    }

    /// Exchange the refresh token for a new access token
    ///
    /// On failure the session is ended before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the refresh endpoint's error, or `NotAuthenticated` if the
    /// session ended while the exchange was in flight.
    pub async fn renew(&self, refresh_token: &str) -> Result<String> {
        match self.client.refresh_access_token(refresh_token).await {
            Ok(access) => self.apply_renewal(refresh_token, access),
            Err(e) => {
                error!(error = %e, "Session renewal failed, logging out");
                self.logout();
                Err(e)
            }
        }
    }

    fn apply_renewal(&self, refresh_token: &str, access: String) -> Result<String> {
        {
            let mut state = self.write_state();
            let Some(current) = state
                .pair
                .as_ref()
                .filter(|pair| pair.refresh == refresh_token)
            else {
                debug!("Session ended during renewal, discarding renewed token");
                return Err(ClientError::NotAuthenticated);
            };

            let pair = current.with_access(&access);
            if let Err(e) = self.store.save(&pair) {
                warn!(error = %e, "Could not persist renewed credentials");
            }
            *state = SessionState::from_pair(Some(pair));
        }

        info!("Session renewed");
        self.publish();
        Ok(access)
    }

    fn publish(&self) {
        let next = self.read_state().status();
        self.status.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// Current credential pair
    pub fn credentials(&self) -> Option<CredentialPair> {
        self.read_state().pair.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.borrow().is_authenticated()
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified whenever the status changes
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CredentialSource for SessionManager {
    fn credentials(&self) -> Option<CredentialPair> {
        Self::credentials(self)
    }

    async fn renew(&self, refresh_token: &str) -> Result<String> {
        Self::renew(self, refresh_token).await
    }

    fn logout(&self) {
        Self::logout(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_requires_pair_and_identity() {
        assert_eq!(
            SessionState::default().status(),
            SessionStatus::Unauthenticated
        );

        let opaque = SessionState::from_pair(Some(CredentialPair::new("opaque", "refresh")));
        assert!(opaque.pair.is_some());
        assert_eq!(opaque.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn status_exposes_identity() {
        let status = SessionStatus::Authenticated(Identity {
            username: "alice".into(),
        });
        assert!(status.is_authenticated());
        assert_eq!(status.identity().map(|i| i.username.as_str()), Some("alice"));
        assert_eq!(SessionStatus::Unauthenticated.identity(), None);
    }
}
