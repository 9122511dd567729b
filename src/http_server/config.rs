//! Server and service configuration
//!
//! Two layers: `HttpServerConfig` for bind/CORS plumbing and
//! `ServiceConfig` for the service contract (identity string, AI
//! credential, rate limit knobs). Both load from the environment once at
//! process start. A missing identity does not abort startup — the
//! service listens and reports the misconfiguration on every endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ratelimit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load bind settings from `BFHL_HOST` / `BFHL_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: non_empty_var("BFHL_HOST").unwrap_or(defaults.host),
            port: non_empty_var("BFHL_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Service contract configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Identity string stamped into every envelope. Required: when absent
    /// every endpoint fails closed with a configuration error.
    pub identity: Option<String>,

    /// AI provider credential. Absent disables only the AI operation.
    pub gemini_api_key: Option<String>,

    /// AI provider model name
    pub gemini_model: String,

    /// Requests allowed per client per window
    pub rate_limit: u32,

    /// Rate limiter window length
    pub rate_window: Duration,
}

impl ServiceConfig {
    /// Load from `BFHL_IDENTITY`, `GEMINI_API_KEY`, `GEMINI_MODEL`,
    /// `BFHL_RATE_LIMIT`, `BFHL_RATE_WINDOW_SECS`
    pub fn from_env() -> Self {
        Self {
            identity: non_empty_var("BFHL_IDENTITY"),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            rate_limit: non_empty_var("BFHL_RATE_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_REQUESTS),
            rate_window: non_empty_var("BFHL_RATE_WINDOW_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_WINDOW),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            identity: None,
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".to_string(),
            rate_limit: DEFAULT_MAX_REQUESTS,
            rate_window: DEFAULT_WINDOW,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_http_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_service_config() {
        let config = ServiceConfig::default();
        assert!(config.identity.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.rate_limit, DEFAULT_MAX_REQUESTS);
        assert_eq!(config.rate_window, DEFAULT_WINDOW);
    }
}
