//! Client configuration.
//!
//! Values come from environment variables (`SIMPLENOTES_*`), falling back to
//! the defaults in [`simplenotes_core::defaults`]. Unparseable numbers fall
//! back to their default as well.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use simplenotes_core::defaults;
use simplenotes_core::{Error, Result};

/// Configuration for [`crate::HttpNoteStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the service; the notes resource lives under `/api/notes`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Retries for transient failures.
    pub max_retries: u32,
    /// Delay between attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECS,
            max_retries: defaults::MAX_RETRIES,
            retry_delay_ms: defaults::RETRY_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let config = Self {
            base_url: std::env::var(defaults::ENV_BASE_URL)
                .unwrap_or_else(|_| defaults::BASE_URL.to_string()),
            timeout_seconds: std::env::var(defaults::ENV_TIMEOUT_SECS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::TIMEOUT_SECS),
            max_retries: std::env::var(defaults::ENV_MAX_RETRIES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::MAX_RETRIES),
            retry_delay_ms: defaults::RETRY_DELAY_MS,
        };
        debug!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            max_retries = config.max_retries,
            "Loaded client config from environment"
        );
        config
    }

    /// Point the client at a different server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(Error::Config(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(Error::Config(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, defaults::BASE_URL);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = ClientConfig::default().with_base_url("");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = ClientConfig::default().with_base_url("ftp://notes.example");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig::default().with_timeout_seconds(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_builders_override_fields() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout_seconds(5)
            .with_max_retries(0)
            .with_retry_delay_ms(10);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.retry_delay_ms, 10);
        assert!(config.validate().is_ok());
    }
}
