//! Notification service client configuration.
//!
//! Defaults point at a locally running service. Override via environment
//! variables or explicit construction for other deployments.

use url::Url;

/// Base URL used when `NOTIF_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request timeout used when `NOTIF_TIMEOUT_SECS` is not set or not a number.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the service. Commands are posted to `{base_url}/notification`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NOTIF_BASE_URL` (default: `http://localhost:8080`)
    /// - `NOTIF_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("NOTIF_BASE_URL", DEFAULT_BASE_URL)?,
            timeout_secs: std::env::var("NOTIF_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration for a service listening on `127.0.0.1:{port}`.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            timeout_secs: 5,
        })
    }

    /// Replace the base URL, validating it.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url("base URL", raw)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The command endpoint, `{base_url}/notification`.
    ///
    /// A base URL with a path prefix keeps it: `http://host/api` yields
    /// `http://host/api/notification`.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(crate::NOTIFICATION_PATH)
            .map_err(|e| ConfigError::InvalidUrl("endpoint".to_string(), e.to_string()))
    }
}

fn parse_url(label: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(label.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            label.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
