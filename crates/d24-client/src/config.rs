//! Drivers24 API client configuration.
//!
//! One base URL for the backend and a request timeout. Defaults point to a
//! local development server. Override via environment variables or explicit
//! construction for staging and tests.

use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the Drivers24 backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL. All endpoints live under `{base_url}/api/...`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Configuration for an explicit base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `D24_API_URL` (default: `http://localhost:3000`)
    /// - `D24_TIMEOUT_SECS` (default: 30)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for a malformed `D24_API_URL` and
    /// [`ConfigError::InvalidTimeout`] for a timeout that is not a positive
    /// whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("D24_API_URL", DEFAULT_API_URL)?,
            timeout_secs: env_timeout("D24_TIMEOUT_SECS")?,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed
    /// (should not occur for valid port numbers, but avoids `expect()`).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            timeout_secs: 5,
        })
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn env_timeout(var: &str) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(DEFAULT_TIMEOUT_SECS),
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidTimeout(var.to_string(), raw)),
        },
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout in {0}: \"{1}\" (expected a positive number of seconds)")]
    InvalidTimeout(String, String),
}
