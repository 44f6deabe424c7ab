//! Query parameters, view props and navigation requests.
//!
//! # Design Decisions
//! - Values are plain strings, never coerced
//! - Repeated query keys keep the first value
//! - BTreeMap keeps query strings and JSON output deterministic

use std::collections::BTreeMap;

use serde::Serialize;
use url::form_urlencoded;

use crate::routing::error::NavigationError;

/// Query-string parameters of a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    map: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an already-split query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params
                .map
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        params
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded`, without the `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Named inputs handed to a view at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Props {
    map: BTreeMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.map.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Project a single query parameter into a prop of the same name.
    ///
    /// A missing parameter leaves the prop absent.
    pub fn project(query: &QueryParams, field: &str) -> Self {
        let mut props = Self::new();
        if let Some(value) = query.get(field) {
            props.insert(field, value);
        }
        props
    }
}

/// A requested transition: a path plus its query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub query: QueryParams,
}

impl NavigationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Parse a location such as `/reader?comicUrl=a.cbz`.
    ///
    /// The path is kept byte-for-byte (no dot-segment or slash
    /// normalization) so lookup stays an exact match. The fragment is
    /// dropped.
    pub fn parse(location: &str) -> Result<Self, NavigationError> {
        if location.is_empty() {
            return Err(NavigationError::EmptyPath);
        }
        if !location.starts_with('/') {
            return Err(NavigationError::InvalidLocation {
                location: location.to_string(),
                reason: "locations must start with `/`".to_string(),
            });
        }

        let without_fragment = location.split_once('#').map_or(location, |(head, _)| head);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (without_fragment, QueryParams::new()),
        };

        Ok(Self {
            path: path.to_string(),
            query,
        })
    }

    /// Path followed by `?query` when the query is non-empty.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.to_query_string())
        }
    }
}
