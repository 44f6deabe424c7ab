//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment prefix for history URLs (e.g. "/" or "/comics/").
    pub history_base: String,

    /// Development server settings.
    pub dev_server: DevServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_base: "/".to_string(),
            dev_server: DevServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Development server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Prefix-forwarding rules.
    pub proxy: Vec<ProxyRule>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
            proxy: vec![ProxyRule {
                prefix: "/covers".to_string(),
                target: "http://localhost:5239/public".to_string(),
                change_origin: true,
            }],
        }
    }
}

/// Forward requests under `prefix` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyRule {
    /// Path prefix to match (case-sensitive).
    pub prefix: String,

    /// Upstream origin, optionally with a base path.
    pub target: String,

    /// Rewrite the Host header to the target's authority.
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,
}

fn default_change_origin() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
