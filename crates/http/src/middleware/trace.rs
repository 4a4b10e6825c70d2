//! Request tracing middleware

use super::{Middleware, Next};
use crate::error::Result;
use crate::request::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use tracing::Instrument;

/// Tracing middleware configuration
#[derive(Debug, Clone)]
pub struct TraceMiddleware {
    pub service_name: String,
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        Self {
            service_name: "quill-http".to_string(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Middleware for TraceMiddleware {
    async fn handle(&self, request: ApiRequest, next: Next<'_>) -> Result<ApiResponse> {
        let span = info_span!(
            "api_request",
            service = %self.service_name,
            http.method = %request.method(),
            http.path = %request.path(),
            retry = request.is_retry(),
            http.status_code = tracing::field::Empty,
        );

        async move {
            debug!("Sending request");
            let result = next.run(request).await;

            match &result {
                Ok(response) => {
                    tracing::Span::current().record("http.status_code", response.status().as_u16());
                    debug!(status = %response.status(), "Received response");
                }
                Err(e) => debug!(error = %e, "Request failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}
