//! Build-time configuration

use quill_core::{ApiConfig, ConfigError};

/// Blog API base URL baked in at build time
const API_URL: Option<&str> = option_env!("QUILL_API_URL");

/// API configuration for the browser client
///
/// Browsers cannot read the environment at runtime, so the URL must be set
/// when the bundle is built (`QUILL_API_URL=... trunk build`).
pub fn api_config() -> Result<ApiConfig, ConfigError> {
    ApiConfig::require(API_URL)
}
