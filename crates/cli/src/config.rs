//! CLI configuration
//!
//! Layered lowest to highest: built-in defaults, the TOML config file,
//! `QUILL_*` environment variables, then command-line flags.

use anyhow::{Context, Result};
use quill_core::ApiConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Blog API base URL
    pub api_url: Option<String>,
    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
    /// Directory for the stored session and log file
    pub data_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from `path`, or the default config file if present
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or a source cannot be parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    fn load_from(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?;

        match path {
            Some(path) => builder = builder.add_source(::config::File::from(path)),
            None => {
                if let Some(default) = default_config_path() {
                    builder = builder.add_source(::config::File::from(default).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix("QUILL")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to load configuration")?;

        Ok(settings.try_deserialize()?)
    }

    /// API configuration with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL is configured or it is not a valid URL
    pub fn api_config(&self, api_url: Option<&str>, timeout_secs: Option<u64>) -> Result<ApiConfig> {
        let config = ApiConfig::require(api_url.or(self.api_url.as_deref()))?;
        let timeout = timeout_secs.unwrap_or(self.timeout_secs);
        Ok(config.with_timeout(Duration::from_secs(timeout)))
    }

    /// Data directory with the command-line override applied
    pub fn data_dir(&self, data_dir: Option<PathBuf>) -> PathBuf {
        data_dir
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(default_data_dir)
    }
}

/// `<config dir>/quill/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quill").join("config.toml"))
}

/// `<data dir>/quill`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quill")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Option<::config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let config = CliConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(config.api_url, None);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.api_config(None, None).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "api_url = \"http://file.example/api\"\ntimeout_secs = 5\n",
        );

        let config =
            CliConfig::load_from(Some(&path), env(&[("QUILL_API_URL", "http://env.example/api/")]))
                .unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://env.example/api/"));
        assert_eq!(config.timeout_secs, 5);

        let api = config.api_config(None, None).unwrap();
        assert_eq!(api.base_url, "http://env.example/api");
        assert_eq!(api.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_flags_override_everything() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"http://file.example\"\n");

        let config = CliConfig::load_from(
            Some(&path),
            env(&[("QUILL_DATA_DIR", "/tmp/quill-env")]),
        )
        .unwrap();

        let api = config
            .api_config(Some("http://flag.example"), Some(0))
            .unwrap();
        assert_eq!(api.base_url, "http://flag.example");
        assert_eq!(api.timeout(), None);

        assert_eq!(config.data_dir(None), PathBuf::from("/tmp/quill-env"));
        assert_eq!(
            config.data_dir(Some(PathBuf::from("/tmp/flag"))),
            PathBuf::from("/tmp/flag")
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CliConfig::load_from(Some(&missing), env(&[])).is_err());
    }
}
