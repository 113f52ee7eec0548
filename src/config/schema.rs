//! Configuration schema definitions.
//!
//! This module defines the service configuration read from a TOML file.
//! Backend credentials are deliberately absent: they only ever come from
//! the process environment (see [`crate::backend::env`]).

use serde::{Deserialize, Serialize};

/// Default path of the config proxy function.
pub const DEFAULT_PROXY_ROUTE: &str = "/.netlify/functions/get-firebase-config";

/// Root configuration for the config bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Config proxy endpoint settings.
    pub proxy: ProxyConfig,

    /// Client-side loader settings (used by `config-cli`).
    pub loader: LoaderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
        }
    }
}

/// Config proxy endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Path the proxy function is mounted at.
    pub route: String,

    /// Value of `Access-Control-Allow-Origin` on successful responses.
    pub allow_origin: String,

    /// `max-age` of the public cache directive, in seconds.
    pub cache_max_age_secs: u64,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_PROXY_ROUTE.to_string(),
            allow_origin: "*".to_string(),
            cache_max_age_secs: 3600,
            request_timeout_secs: 10,
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Absolute URL of the config proxy endpoint.
    pub endpoint: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            endpoint: format!("http://127.0.0.1:8888{}", DEFAULT_PROXY_ROUTE),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.proxy.route, DEFAULT_PROXY_ROUTE);
        assert_eq!(config.proxy.allow_origin, "*");
        assert_eq!(config.proxy.cache_max_age_secs, 3600);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [proxy]
            allow_origin = "https://spa.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.proxy.allow_origin, "https://spa.example.com");
        assert_eq!(config.proxy.route, DEFAULT_PROXY_ROUTE);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8888");
    }
}
