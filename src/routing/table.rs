//! Route table: immutable path and name lookup.
//!
//! # Design Decisions
//! - Built once at startup, never mutated (shared via Arc without locks)
//! - O(1) exact lookup by path and by name
//! - Duplicate paths or names are rejected at construction
//! - Explicit NotFound rather than silent default

use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::error::{NavigationError, RouteNotFoundError, RouteTableError};
use crate::routing::query::{NavigationRequest, Props, QueryParams};
use crate::routing::route::Route;
use crate::views::View;

/// Outcome of resolving a navigation request.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Name of the matched route.
    pub route: String,
    /// The request, as matched.
    pub request: NavigationRequest,
    pub view: Arc<View>,
    pub props: Props,
}

impl Resolved {
    pub fn full_path(&self) -> String {
        self.request.full_path()
    }
}

/// Ordered, immutable set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let mut by_path = HashMap::with_capacity(routes.len());
        let mut by_name = HashMap::with_capacity(routes.len());

        for (idx, route) in routes.iter().enumerate() {
            if !route.path().starts_with('/') {
                return Err(RouteTableError::InvalidPath(route.path().to_string()));
            }
            if by_path.insert(route.path().to_string(), idx).is_some() {
                return Err(RouteTableError::DuplicatePath(route.path().to_string()));
            }
            if by_name.insert(route.name().to_string(), idx).is_some() {
                return Err(RouteTableError::DuplicateName(route.name().to_string()));
            }
        }

        Ok(Self {
            routes,
            by_path,
            by_name,
        })
    }

    /// Exact-match lookup by path.
    pub fn lookup(&self, path: &str) -> Result<&Route, RouteNotFoundError> {
        self.by_path
            .get(path)
            .map(|&idx| &self.routes[idx])
            .ok_or_else(|| RouteNotFoundError {
                path: path.to_string(),
            })
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// Build the request for a named route.
    pub fn request_for(
        &self,
        name: &str,
        query: QueryParams,
    ) -> Result<NavigationRequest, NavigationError> {
        let route = self
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownRouteName(name.to_string()))?;
        Ok(NavigationRequest::new(route.path()).with_query(query))
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match, load and derive props without touching any router state.
    pub async fn resolve(&self, request: NavigationRequest) -> Result<Resolved, NavigationError> {
        if request.path.is_empty() {
            return Err(NavigationError::EmptyPath);
        }

        let route = self.lookup(&request.path)?;
        let view = route.loader().load().await?;
        let props = route.derive_props(&request.query);

        Ok(Resolved {
            route: route.name().to_string(),
            request,
            view,
            props,
        })
    }
}
