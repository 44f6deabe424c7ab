//! Navigation history, mirroring the browser History API.

/// One committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Name of the route that rendered.
    pub route: String,
    /// Path and query string, relative to the history base.
    pub location: String,
}

/// Append-only list of committed locations under a base path.
#[derive(Debug, Clone)]
pub struct History {
    base: String,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// `base` is the deployment prefix (e.g. `/` or `/comics/`).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: normalize_base(&base.into()),
            entries: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn push(&mut self, route: impl Into<String>, location: impl Into<String>) {
        self.entries.push(HistoryEntry {
            route: route.into(),
            location: location.into(),
        });
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Address-bar form of a location: base prefix plus location.
    pub fn href(&self, location: &str) -> String {
        format!("{}{}", self.base, location)
    }

    /// Inverse of `href`: the route path inside the base, if any.
    pub fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        strip_base(&self.base, path)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Base without the trailing slash; locations carry the leading one.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Remove a normalized base from an address-bar path.
///
/// `/comics` strips from `/comics` and `/comics/...`, not from `/comicsx`.
pub fn strip_base<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    if base.is_empty() {
        return Some(path);
    }
    match path.strip_prefix(base)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}
