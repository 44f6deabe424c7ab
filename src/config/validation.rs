//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting proxy rules
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("history_base `{0}` must start with `/`")]
    HistoryBase(String),

    #[error("bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("proxy prefix `{0}` must start with `/`")]
    ProxyPrefix(String),

    #[error("proxy prefix `{0}` is declared more than once")]
    DuplicateProxyPrefix(String),

    #[error("proxy target `{target}` is invalid: {reason}")]
    ProxyTarget { target: String, reason: String },
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.history_base.starts_with('/') {
        errors.push(ValidationError::HistoryBase(config.history_base.clone()));
    }

    let server = &config.dev_server;
    if server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(server.bind_address.clone()));
    }
    if server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for rule in &server.proxy {
        if !rule.prefix.starts_with('/') {
            errors.push(ValidationError::ProxyPrefix(rule.prefix.clone()));
        }
        if !seen.insert(rule.prefix.as_str()) {
            errors.push(ValidationError::DuplicateProxyPrefix(rule.prefix.clone()));
        }
        if let Err(reason) = check_target(&rule.target) {
            errors.push(ValidationError::ProxyTarget {
                target: rule.target.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() {
        return Err("query strings are not allowed".to_string());
    }
    Ok(())
}
