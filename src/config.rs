//! Configuration Module
//!
//! Handles loading and managing sidecar configuration from environment variables.

use std::env;
use std::time::Duration;

/// Sidecar configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds applied to entries on refresh
    pub default_expiry: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the remote parameter service
    pub store_endpoint: String,
    /// Per-request timeout for calls to the parameter service, in seconds
    pub store_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_EXPIRY_SECS` - Entry TTL in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_ENDPOINT` - Parameter service URL (default: http://127.0.0.1:4000)
    /// - `STORE_TIMEOUT_SECS` - Parameter service request timeout (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_expiry: parse_var("DEFAULT_EXPIRY_SECS").unwrap_or(defaults.default_expiry),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            store_endpoint: env::var("STORE_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.store_endpoint),
            store_timeout: parse_var("STORE_TIMEOUT_SECS").unwrap_or(defaults.store_timeout),
        }
    }

    /// Returns the configured entry TTL.
    pub fn default_expiry(&self) -> Duration {
        Duration::from_secs(self.default_expiry)
    }

    /// Returns the configured parameter service timeout.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_expiry: 30,
            server_port: 3000,
            store_endpoint: "http://127.0.0.1:4000".to_string(),
            store_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_expiry, 30);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.store_endpoint, "http://127.0.0.1:4000");
        assert_eq!(config.store_timeout, 10);
        assert_eq!(config.default_expiry(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_EXPIRY_SECS");
        env::remove_var("SERVER_PORT");
        env::remove_var("STORE_ENDPOINT");
        env::remove_var("STORE_TIMEOUT_SECS");

        let config = Config::from_env();
        assert_eq!(config.default_expiry, 30);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.store_endpoint, "http://127.0.0.1:4000");
        assert_eq!(config.store_timeout(), Duration::from_secs(10));
    }
}
