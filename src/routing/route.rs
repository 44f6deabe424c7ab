//! Route entries.

use std::sync::Arc;

use crate::routing::error::ViewLoadError;
use crate::routing::lazy::{LazyView, LoadFn};
use crate::routing::query::{Props, QueryParams};
use crate::views::View;

/// Pure projection from query parameters to view props.
pub type PropsDeriver = fn(&QueryParams) -> Props;

/// How a route obtains its view.
#[derive(Debug, Clone)]
pub enum ViewLoader {
    /// View is available immediately.
    Eager(Arc<View>),
    /// View is loaded on first navigation and cached.
    Lazy(LazyView),
}

impl ViewLoader {
    pub async fn load(&self) -> Result<Arc<View>, ViewLoadError> {
        match self {
            ViewLoader::Eager(view) => Ok(view.clone()),
            ViewLoader::Lazy(lazy) => lazy.get().await,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ViewLoader::Lazy(_))
    }
}

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    name: String,
    loader: ViewLoader,
    props: Option<PropsDeriver>,
}

impl Route {
    /// A route whose view is available immediately.
    pub fn eager(path: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            loader: ViewLoader::Eager(Arc::new(view)),
            props: None,
        }
    }

    /// A route whose view is loaded on first navigation.
    pub fn lazy(
        path: impl Into<String>,
        name: impl Into<String>,
        chunk: &'static str,
        load: LoadFn,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            loader: ViewLoader::Lazy(LazyView::new(chunk, load)),
            props: None,
        }
    }

    /// Attach a props deriver evaluated on every navigation.
    pub fn with_props(mut self, deriver: PropsDeriver) -> Self {
        self.props = Some(deriver);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loader(&self) -> &ViewLoader {
        &self.loader
    }

    /// Props for a navigation; empty when the route derives none.
    pub fn derive_props(&self, query: &QueryParams) -> Props {
        self.props.map(|derive| derive(query)).unwrap_or_default()
    }
}
