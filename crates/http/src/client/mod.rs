//! Typed clients for the blog API

pub mod auth;
pub mod posts;

use crate::error::Result;
use crate::middleware::{Pipeline, RequestCoordinator, TraceMiddleware};
use crate::request::{ApiRequest, ApiResponse};
use crate::session::SessionManager;
use crate::transport::{ReqwestTransport, Transport};
use quill_core::{ApiConfig, CredentialStore, Navigator};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Client for endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicClient {
    transport: Arc<dyn Transport>,
}

/// Client for endpoints that require a valid access token
///
/// Every call runs through the request coordinator, so an expired access
/// token is renewed and the call replayed without the caller noticing.
#[derive(Clone)]
pub struct AuthenticatedClient {
    pipeline: Pipeline,
}

impl PublicClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request without credentials
    ///
    /// # Errors
    ///
    /// Returns an error only if the transport fails
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = %request.method(), path = %request.path(), "Public call");
        self.transport.send(request).await
    }

    /// Send a request and decode a successful JSON response
    ///
    /// # Errors
    ///
    /// Returns the error matching a non-2xx status, or a decode failure
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.error_for_status()?.json()
    }
}

impl AuthenticatedClient {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Send a request through the authenticated channel
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the session could not be
    /// renewed
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.pipeline.send(request).await
    }

    /// Send a request and decode a successful JSON response
    ///
    /// # Errors
    ///
    /// Returns the error matching a non-2xx status, or a decode failure
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.error_for_status()?.json()
    }

    /// Send a request whose successful response carries no body
    ///
    /// # Errors
    ///
    /// Returns the error matching a non-2xx status
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<()> {
        self.send(request).await?.error_for_status()?;
        Ok(())
    }
}

/// Both API channels wired to one session
///
/// Owns the session manager and the request coordinator; every clone of
/// [`BlogClient::api`] shares the same renewal state.
pub struct BlogClient {
    public: PublicClient,
    session: Arc<SessionManager>,
    coordinator: Arc<RequestCoordinator>,
    api: AuthenticatedClient,
}

impl BlogClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Ok(Self::with_transport(transport, store, navigator))
    }

    /// Create a client on top of an existing transport
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let public = PublicClient::new(transport.clone());
        let session = Arc::new(SessionManager::new(public.clone(), store, navigator));
        let coordinator = Arc::new(RequestCoordinator::new(session.clone()));

        let pipeline = Pipeline::builder(transport)
            .with(Arc::new(TraceMiddleware::default()))
            .with(coordinator.clone())
            .build();

        Self {
            public,
            session,
            coordinator,
            api: AuthenticatedClient::new(pipeline),
        }
    }

    pub fn public(&self) -> &PublicClient {
        &self.public
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    /// Authenticated channel
    pub fn api(&self) -> &AuthenticatedClient {
        &self.api
    }
}
