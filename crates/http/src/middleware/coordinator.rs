//! Access-token attachment and single-flight renewal for the authenticated channel
//!
//! Every call gets the current access token. When the backend answers 401 the
//! coordinator renews the token through the session, exactly once for all calls
//! that fail while that renewal is running, and replays each of them once with
//! the new token. If renewal fails, every waiting call fails with the same error.

use super::{Middleware, Next};
use crate::error::{ClientError, Result};
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use quill_core::CredentialPair;
use reqwest::Method;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// Session operations the coordinator depends on
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CredentialSource: Send + Sync {
    /// Current credential pair, if a session exists
    fn credentials(&self) -> Option<CredentialPair>;

    /// Exchange the refresh token for a new access token
    ///
    /// Implementations end the session before returning an error.
    async fn renew(&self, refresh_token: &str) -> Result<String>;

    /// End the session
    fn logout(&self);
}

type RenewalOutcome = std::result::Result<String, Arc<ClientError>>;

/// Call suspended until the in-flight renewal settles
struct PendingCall {
    method: Method,
    path: String,
    notify: oneshot::Sender<RenewalOutcome>,
}

/// Renewal flag and the queue of calls waiting on it; guarded together
#[derive(Default)]
struct RenewalState {
    in_flight: bool,
    pending: Vec<PendingCall>,
}

/// What a call rejected with 401 does next
enum Recovery {
    /// Another call is renewing; wait for its outcome
    Wait(oneshot::Receiver<RenewalOutcome>),
    /// The token was renewed after this call was sent; replay with it
    Replay(String),
    /// This call renews with the given refresh token
    Renew(String),
    /// No session exists to renew
    Unrecoverable,
}

/// Middleware attaching credentials and coordinating renewal
pub struct RequestCoordinator {
    session: Arc<dyn CredentialSource>,
    state: Mutex<RenewalState>,
}

impl RequestCoordinator {
    pub fn new(session: Arc<dyn CredentialSource>) -> Self {
        Self {
            session,
            state: Mutex::new(RenewalState::default()),
        }
    }

    /// Check if a renewal is currently outstanding
    pub fn is_renewing(&self) -> bool {
        self.lock_state().in_flight
    }

    /// Number of calls waiting on the current renewal
    pub fn pending_calls(&self) -> usize {
        self.lock_state().pending.len()
    }

    fn lock_state(&self) -> MutexGuard<'_, RenewalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decide how to recover a rejected call
    ///
    /// Checking the flag and either setting it or enqueueing happens under one
    /// lock, so two rejected calls can never both start a renewal.
    fn plan_recovery(&self, request: &ApiRequest) -> Recovery {
        let mut state = self.lock_state();

        if state.in_flight {
            let (notify, outcome) = oneshot::channel();
            state.pending.push(PendingCall {
                method: request.method().clone(),
                path: request.path().to_string(),
                notify,
            });
            debug!(
                path = %request.path(),
                pending = state.pending.len(),
                "Queued call behind in-flight renewal"
            );
            return Recovery::Wait(outcome);
        }

        match self.session.credentials() {
            None => Recovery::Unrecoverable,
            Some(pair) if request.bearer_token() != Some(pair.access.as_str()) => {
                Recovery::Replay(pair.access)
            }
            Some(pair) => {
                state.in_flight = true;
                Recovery::Renew(pair.refresh)
            }
        }
    }

    /// Run the renewal and release every queued call with its outcome
    async fn renew(&self, refresh_token: &str) -> Result<String> {
        let mut guard = RenewalGuard {
            coordinator: self,
            settled: false,
        };

        info!("Access token rejected, renewing session");
        let outcome = self.session.renew(refresh_token).await.map_err(Arc::new);
        guard.settle(outcome.clone());

        outcome.map_err(ClientError::Renewal)
    }

    fn settle(&self, outcome: &RenewalOutcome) {
        let pending = {
            let mut state = self.lock_state();
            state.in_flight = false;
            std::mem::take(&mut state.pending)
        };

        match outcome {
            Ok(_) => debug!(
                queued = pending.len(),
                "Session renewed, replaying queued calls"
            ),
            Err(e) => warn!(
                queued = pending.len(),
                error = %e,
                "Session renewal failed, rejecting queued calls"
            ),
        }

        for call in pending {
            if call.notify.send(outcome.clone()).is_err() {
                debug!(
                    method = %call.method,
                    path = %call.path,
                    "Queued call was dropped before renewal settled"
                );
            }
        }
    }
}

/// Resets the renewal flag even if the renewing call is dropped mid-flight
struct RenewalGuard<'a> {
    coordinator: &'a RequestCoordinator,
    settled: bool,
}

impl RenewalGuard<'_> {
    fn settle(&mut self, outcome: RenewalOutcome) {
        self.settled = true;
        self.coordinator.settle(&outcome);
    }
}

impl Drop for RenewalGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Renewing call dropped before the session was renewed");
            self.coordinator
                .settle(&Err(Arc::new(ClientError::RenewalAborted)));
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Middleware for RequestCoordinator {
    async fn handle(&self, mut request: ApiRequest, next: Next<'_>) -> Result<ApiResponse> {
        if let Some(pair) = self.session.credentials() {
            request.set_bearer(&pair.access)?;
        }

        let response = next.run(request.clone()).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        if request.is_retry() {
            warn!(path = %request.path(), "Replayed call rejected again");
            return Ok(response);
        }

        let token = match self.plan_recovery(&request) {
            Recovery::Wait(outcome) => match outcome.await {
                Ok(Ok(token)) => token,
                Ok(Err(error)) => return Err(ClientError::Renewal(error)),
                Err(_) => return Err(ClientError::RenewalAborted),
            },
            Recovery::Replay(token) => {
                debug!(path = %request.path(), "Token renewed since call was sent, replaying");
                token
            }
            Recovery::Renew(refresh_token) => self.renew(&refresh_token).await?,
            Recovery::Unrecoverable => {
                warn!(path = %request.path(), "Call rejected without a session to renew");
                self.session.logout();
                return Ok(response);
            }
        };

        request.mark_retry();
        request.set_bearer(&token)?;
        let path = request.path().to_string();

        let replay = next.run(request).await?;
        if replay.is_unauthorized() {
            warn!(path = %path, "Replayed call rejected again");
        }
        Ok(replay)
    }
}
