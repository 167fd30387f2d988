//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientBuilder};

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Serializable client settings
///
/// ```
/// use http_client_wrapper::ClientConfig;
///
/// let config: ClientConfig =
///     serde_json::from_str(r#"{"base_path": "https://postman-echo.com/"}"#).expect("valid config");
/// assert_eq!(config.timeout_secs, 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every request path is joined onto
    pub base_path: String,
    /// Round-trip timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Config with the default timeout for `base_path`
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Round-trip timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builder preloaded with these settings
    pub fn builder(&self) -> ClientBuilder {
        Client::builder(&self.base_path).timeout(self.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_path": "http://www.example.com"}"#)
                .expect("valid config");
        assert_eq!(config, ClientConfig::new("http://www.example.com"));
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_timeout_from_json() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_path": "http://www.example.com", "timeout_secs": 5}"#,
        )
        .expect("valid config");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_base_path() {
        let result: Result<ClientConfig, _> = serde_json::from_str(r#"{"timeout_secs": 5}"#);
        assert!(result.is_err());
    }
}
