//! API endpoint configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "QUILL_API_URL";

/// Backend location and transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash
    pub base_url: String,

    /// Request timeout in seconds (ignored in the browser)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Validate and normalize a base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or does not parse
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl(API_URL_ENV));
        }

        url::Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout_secs: None,
        })
    }

    /// Build from an optional URL, treating absence as fatal
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] when `base_url` is `None`
    pub fn require(base_url: Option<&str>) -> Result<Self, ConfigError> {
        base_url.map_or(Err(ConfigError::MissingBaseUrl(API_URL_ENV)), Self::new)
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Load from `QUILL_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `QUILL_API_URL` is unset or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_source(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_env_source(
        source: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct EnvSettings {
            api_url: Option<String>,
            timeout_secs: Option<u64>,
        }

        let settings: EnvSettings = ::config::Config::builder()
            .add_source(
                ::config::Environment::with_prefix("QUILL")
                    .try_parsing(true)
                    .source(source),
            )
            .build()?
            .try_deserialize()?;

        let config = Self::require(settings.api_url.as_deref())?;
        Ok(Self {
            timeout_secs: settings.timeout_secs,
            ..config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8000/api/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.endpoint("/token/"), "http://localhost:8000/api/token/");
        assert_eq!(config.endpoint("posts/"), "http://localhost:8000/api/posts/");
    }

    #[test]
    fn rejects_missing_and_invalid_urls() {
        assert!(matches!(
            ApiConfig::require(None),
            Err(ConfigError::MissingBaseUrl(API_URL_ENV))
        ));
        assert!(matches!(
            ApiConfig::new("   "),
            Err(ConfigError::MissingBaseUrl(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = ApiConfig::new("http://localhost").unwrap();
        assert_eq!(config.timeout(), None);
        assert_eq!(
            config.clone().with_timeout(Duration::from_secs(5)).timeout(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.with_timeout(Duration::ZERO).timeout(), None);
    }

    #[test]
    fn loads_from_environment_source() {
        let mut vars = ::config::Map::new();
        vars.insert("QUILL_API_URL".to_string(), "http://api.test/".to_string());
        vars.insert("QUILL_TIMEOUT_SECS".to_string(), "12".to_string());

        let config = ApiConfig::from_env_source(Some(vars)).unwrap();
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.timeout(), Some(Duration::from_secs(12)));
    }

    #[test]
    fn missing_environment_url_is_fatal() {
        let config = ApiConfig::from_env_source(Some(::config::Map::new()));
        assert!(matches!(config, Err(ConfigError::MissingBaseUrl(_))));
    }
}
