//! Prefix-based forwarding rules for the dev server.
//!
//! # Responsibilities
//! - Compile configured proxy rules into ready-to-use targets
//! - Match request paths by prefix (case-sensitive)
//! - Build the upstream URI and optional Host rewrite
//!
//! # Design Decisions
//! - Longest prefix wins when rules overlap
//! - The target's base path is prepended; the request path is kept whole
//! - Invalid rules are skipped with a warning (validation rejects them earlier)

use axum::http::{uri::InvalidUri, HeaderValue, Uri};
use url::Url;

use crate::config::ProxyRule;

/// A compiled forwarding rule.
#[derive(Debug, Clone)]
pub struct ProxyTarget {
    prefix: String,
    origin: String,
    base_path: String,
    host: HeaderValue,
    change_origin: bool,
}

impl ProxyTarget {
    pub fn compile(rule: &ProxyRule) -> Option<Self> {
        let url = match Url::parse(&rule.target) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(target_url = %rule.target, error = %e, "Skipping proxy rule with invalid target");
                return None;
            }
        };

        let host = url.host_str()?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let host_value = HeaderValue::from_str(&authority).ok()?;

        Some(Self {
            prefix: rule.prefix.clone(),
            origin: format!("{}://{}", url.scheme(), authority),
            base_path: url.path().trim_end_matches('/').to_string(),
            host: host_value,
            change_origin: rule.change_origin,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Upstream URI for an incoming request URI.
    pub fn upstream_uri(&self, original: &Uri) -> Result<Uri, InvalidUri> {
        let path_and_query = original
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        format!("{}{}{}", self.origin, self.base_path, path_and_query).parse()
    }

    /// Host header value to send upstream, when the origin is rewritten.
    pub fn rewritten_host(&self) -> Option<&HeaderValue> {
        self.change_origin.then_some(&self.host)
    }
}

/// The active set of forwarding rules.
#[derive(Debug, Clone, Default)]
pub struct ProxyTable {
    targets: Vec<ProxyTarget>,
}

impl ProxyTable {
    pub fn from_rules(rules: &[ProxyRule]) -> Self {
        let mut targets: Vec<ProxyTarget> = rules.iter().filter_map(ProxyTarget::compile).collect();
        targets.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { targets }
    }

    pub fn match_path(&self, path: &str) -> Option<&ProxyTarget> {
        self.targets.iter().find(|t| t.matches(path))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
