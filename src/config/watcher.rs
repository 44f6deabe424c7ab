//! Configuration file watcher for hot reload.
//!
//! Only the dev server's proxy rules can change while running. The watcher
//! keeps the live configuration, compares each reloaded file against it,
//! forwards changed proxy rules, and warns about settings that only take
//! effect after a restart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::{AppConfig, ProxyRule};

/// Difference between the live configuration and a reloaded one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// Settings that changed but need a restart.
    pub restart_required: Vec<&'static str>,
    /// New proxy rules, when they changed.
    pub proxy: Option<Vec<ProxyRule>>,
}

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.restart_required.is_empty() && self.proxy.is_none()
    }
}

pub fn diff_config(live: &AppConfig, reloaded: &AppConfig) -> ConfigDiff {
    let mut restart_required = Vec::new();
    if live.history_base != reloaded.history_base {
        restart_required.push("history_base");
    }
    if live.dev_server.bind_address != reloaded.dev_server.bind_address {
        restart_required.push("dev_server.bind_address");
    }
    if live.dev_server.request_timeout_secs != reloaded.dev_server.request_timeout_secs {
        restart_required.push("dev_server.request_timeout_secs");
    }
    if live.observability.log_level != reloaded.observability.log_level {
        restart_required.push("observability.log_level");
    }

    let proxy = (live.dev_server.proxy != reloaded.dev_server.proxy)
        .then(|| reloaded.dev_server.proxy.clone());

    ConfigDiff {
        restart_required,
        proxy,
    }
}

/// Watches the configuration file and streams proxy-rule updates.
pub struct ConfigWatcher {
    path: PathBuf,
    live: AppConfig,
    rules_tx: mpsc::UnboundedSender<Vec<ProxyRule>>,
}

impl ConfigWatcher {
    /// `live` is the configuration the process started with.
    ///
    /// Returns the watcher and a receiver for changed proxy rules.
    pub fn new(path: &Path, live: AppConfig) -> (Self, mpsc::UnboundedReceiver<Vec<ProxyRule>>) {
        let (rules_tx, rules_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                live,
                rules_tx,
            },
            rules_rx,
        )
    }

    /// Start watching the file. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut live,
            rules_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let reloaded = match load_config(&path) {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::error!(path = ?path, error = %e, "Ignoring invalid config change");
                            return;
                        }
                    };

                    let diff = diff_config(&live, &reloaded);
                    if diff.is_empty() {
                        return;
                    }
                    for field in &diff.restart_required {
                        tracing::warn!(field = *field, "Config change needs a restart to take effect");
                    }
                    if let Some(rules) = diff.proxy {
                        tracing::info!(proxy_rules = rules.len(), "Proxy rules changed");
                        live.dev_server.proxy = rules.clone();
                        let _ = rules_tx.send(rules);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?watched, "Config watcher started");
        Ok(watcher)
    }
}
