//! Client configuration.

use std::time::Duration;

/// Default base URL for the production backend.
pub const DEFAULT_API_URL: &str = "https://api.ubuntoo.app";

/// Environment variable overriding the base URL (useful for local backends).
pub const API_URL_ENV: &str = "UBUNTOO_API_URL";

/// Configuration for the API client.
///
/// # Example
///
/// ```ignore
/// use ubuntoo::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:8000")
///     .with_request_timeout(std::time::Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Set the base URL. A trailing slash is stripped so endpoint paths can
    /// be appended uniformly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
