//! Navigation error taxonomy.

use thiserror::Error;

/// No route in the table has the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches path `{path}`")]
pub struct RouteNotFoundError {
    /// The path that was looked up.
    pub path: String,
}

/// A lazy view failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("view `{view}` failed to load: {reason}")]
pub struct ViewLoadError {
    pub view: String,
    pub reason: String,
}

/// Errors produced while resolving a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The request carried an empty path.
    #[error("navigation path must not be empty")]
    EmptyPath,

    /// No route matched the request path.
    #[error(transparent)]
    NotFound(#[from] RouteNotFoundError),

    /// Named navigation referenced a name absent from the table.
    #[error("no route is named `{0}`")]
    UnknownRouteName(String),

    /// The location string could not be parsed.
    #[error("invalid location `{location}`: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// The lazy view loader failed.
    #[error(transparent)]
    ViewLoad(#[from] ViewLoadError),

    /// A newer navigation committed before this one finished.
    #[error("navigation to `{path}` was superseded by a newer navigation")]
    Superseded { path: String },
}

impl NavigationError {
    /// True when the failure means "unknown route" (either by path or by name).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnknownRouteName(_))
    }
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("duplicate route path `{0}`")]
    DuplicatePath(String),

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route path `{0}` must start with `/`")]
    InvalidPath(String),
}
