//! Middleware chain for API calls
//!
//! A [`Middleware`] receives the request and a [`Next`] continuation for the
//! rest of the chain. It may rewrite the request before calling `next`,
//! inspect the response afterwards, or call `next` again to replay the call.

pub mod coordinator;
pub mod trace;

pub use coordinator::{CredentialSource, RequestCoordinator};
pub use trace::TraceMiddleware;

use crate::error::Result;
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::Arc;

/// Interceptor around an API call
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse>;
}

/// Remainder of the chain after the current middleware
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    middlewares: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, middlewares: &'a [Arc<dyn Middleware>]) -> Self {
        Self {
            transport,
            middlewares,
        }
    }

    /// Send `request` through the rest of the chain
    pub async fn run(self, request: ApiRequest) -> Result<ApiResponse> {
        match self.middlewares.split_first() {
            Some((current, rest)) => {
                current
                    .handle(request, Next::new(self.transport, rest))
                    .await
            }
            None => self.transport.send(request).await,
        }
    }
}

/// Transport plus an ordered list of middleware, outermost first
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    middlewares: Arc<[Arc<dyn Middleware>]>,
}

impl Pipeline {
    /// Start a pipeline ending in `transport`
    pub fn builder(transport: Arc<dyn Transport>) -> PipelineBuilder {
        PipelineBuilder {
            transport,
            middlewares: Vec::new(),
        }
    }

    /// Send a request through every middleware and the transport
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        Next::new(self.transport.as_ref(), &self.middlewares)
            .run(request)
            .await
    }
}

/// Builder for [`Pipeline`]
pub struct PipelineBuilder {
    transport: Arc<dyn Transport>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl PipelineBuilder {
    /// Append a middleware; earlier middleware wraps later middleware
    #[must_use]
    pub fn with(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            transport: self.transport,
            middlewares: self.middlewares.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use std::sync::Mutex;

    /// Echoes the request's headers back as the response headers
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            Ok(ApiResponse::new(
                StatusCode::OK,
                request.headers().clone(),
                Bytes::new(),
            ))
        }
    }

    struct Tag {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse> {
            self.log.lock().unwrap().push(format!("before {}", self.name));
            let request = request.header(
                HeaderName::from_static(self.name),
                HeaderValue::from_static("1"),
            );
            let response = next.run(request).await;
            self.log.lock().unwrap().push(format!("after {}", self.name));
            response
        }
    }

    #[tokio::test]
    async fn middleware_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder(Arc::new(EchoTransport))
            .with(Arc::new(Tag {
                name: "x-outer",
                log: log.clone(),
            }))
            .with(Arc::new(Tag {
                name: "x-inner",
                log: log.clone(),
            }))
            .build();

        let response = pipeline.send(ApiRequest::get("/posts/")).await.unwrap();
        let headers: &HeaderMap = response.headers();
        assert!(headers.contains_key("x-outer"));
        assert!(headers.contains_key("x-inner"));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["before x-outer", "before x-inner", "after x-inner", "after x-outer"]
        );
    }

    #[tokio::test]
    async fn empty_pipeline_goes_straight_to_transport() {
        let pipeline = Pipeline::builder(Arc::new(EchoTransport)).build();
        let response = pipeline.send(ApiRequest::get("/posts/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
