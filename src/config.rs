//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_DURATION_SECS;

/// Default upstream API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// Bearer credential for the forms API; per-request header used when unset
    pub api_key: Option<String>,
    /// Base URL of the forms API
    pub api_base_url: String,
    /// Snapshot freshness window in seconds
    pub cache_duration_secs: u64,
    /// Timeout for each upstream request in seconds
    pub upstream_timeout_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HUBSPOT_API_KEY` - Private app token (default: unset)
    /// - `HUBSPOT_API_BASE_URL` - Forms API base URL (default: https://api.hubapi.com)
    /// - `CACHE_DURATION_SECS` - Snapshot freshness in seconds (default: 300)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream request timeout (default: 15)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("HUBSPOT_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            api_base_url: env::var("HUBSPOT_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            cache_duration_secs: env::var("CACHE_DURATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_DURATION_SECS),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Snapshot freshness window.
    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_duration_secs: DEFAULT_CACHE_DURATION_SECS,
            upstream_timeout_secs: 15,
            server_port: 3000,
        }
    }
}

// Never print the credential
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("cache_duration_secs", &self.cache_duration_secs)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("server_port", &self.server_port)
            .finish()
    }
}
