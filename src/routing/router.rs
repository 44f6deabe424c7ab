//! Navigation dispatch and the active-view slot.
//!
//! # Responsibilities
//! - Resolve navigation requests against the route table
//! - Commit the resolved view as the active view
//! - Record committed locations in history
//! - Discard stale resolutions (last navigation wins)
//!
//! # Design Decisions
//! - Every navigation gets a sequence number when it starts
//! - A result commits only if no newer navigation has committed already
//! - A superseded lazy load still fills the view cache
//! - The state lock is never held across an await

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::routing::error::NavigationError;
use crate::routing::history::{History, HistoryEntry};
use crate::routing::query::{NavigationRequest, Props, QueryParams};
use crate::routing::table::{Resolved, RouteTable};
use crate::views::View;

/// The view currently rendered.
#[derive(Debug, Clone)]
pub struct ActiveView {
    pub route: String,
    pub view: Arc<View>,
    pub props: Props,
    /// Path and query string that produced this view.
    pub location: String,
}

#[derive(Debug)]
struct RouterState {
    committed_seq: u64,
    active: Option<ActiveView>,
    history: History,
}

/// Client-side router over an immutable route table.
#[derive(Debug)]
pub struct Router {
    table: Arc<RouteTable>,
    next_seq: AtomicU64,
    state: Mutex<RouterState>,
}

impl Router {
    /// Router with history rooted at `/`.
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self::with_history(table, History::default())
    }

    pub fn with_history(table: Arc<RouteTable>, history: History) -> Self {
        Self {
            table,
            next_seq: AtomicU64::new(0),
            state: Mutex::new(RouterState {
                committed_seq: 0,
                active: None,
                history,
            }),
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Resolve a request and make it the active view.
    pub async fn resolve(&self, request: NavigationRequest) -> Result<Resolved, NavigationError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(seq, path = %request.path, "Navigation started");

        let resolved = match self.table.resolve(request).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(seq, error = %e, "Navigation failed");
                return Err(e);
            }
        };

        let location = resolved.full_path();
        let mut state = self.lock();
        if state.committed_seq > seq {
            tracing::debug!(
                seq,
                committed = state.committed_seq,
                location = %location,
                "Discarding superseded navigation"
            );
            return Err(NavigationError::Superseded {
                path: resolved.request.path,
            });
        }

        state.committed_seq = seq;
        state.history.push(resolved.route.clone(), location.clone());
        state.active = Some(ActiveView {
            route: resolved.route.clone(),
            view: resolved.view.clone(),
            props: resolved.props.clone(),
            location: location.clone(),
        });
        drop(state);

        tracing::debug!(seq, route = %resolved.route, location = %location, "Navigation committed");
        Ok(resolved)
    }

    /// Navigate to a named route.
    pub async fn navigate(
        &self,
        name: &str,
        query: Option<QueryParams>,
    ) -> Result<Resolved, NavigationError> {
        let request = self.table.request_for(name, query.unwrap_or_default())?;
        self.resolve(request).await
    }

    /// Navigate to a location string such as `/reader?comicUrl=a.cbz`.
    pub async fn push(&self, location: &str) -> Result<Resolved, NavigationError> {
        let request = NavigationRequest::parse(location)?;
        self.resolve(request).await
    }

    /// The currently rendered view, if any navigation has committed.
    pub fn active(&self) -> Option<ActiveView> {
        self.lock().active.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.entries().to_vec()
    }

    /// Address-bar URL of the active view.
    pub fn current_location(&self) -> Option<String> {
        let state = self.lock();
        state
            .history
            .current()
            .map(|entry| state.history.href(&entry.location))
    }

    /// Address-bar URL for a named route.
    pub fn href(&self, name: &str, query: Option<QueryParams>) -> Result<String, NavigationError> {
        let request = self.table.request_for(name, query.unwrap_or_default())?;
        Ok(self.lock().history.href(&request.full_path()))
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
