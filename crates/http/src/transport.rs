//! Transport layer: the "send" capability at the end of every pipeline

use crate::error::Result;
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use quill_core::ApiConfig;
use reqwest::{Client, ClientBuilder};

const USER_AGENT: &str = concat!("quill-client/", env!("CARGO_PKG_VERSION"));

/// Sends a request to the backend and buffers the response
///
/// Non-2xx statuses are returned as responses, not errors, so middleware can
/// inspect them; only transport failures are errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    /// Create a transport for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: ApiConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;

        Ok(Self { client, config })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.config.endpoint(request.path());
        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers().clone());

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse::new(status, headers, body))
    }
}
