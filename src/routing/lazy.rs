//! Deferred view loading.
//!
//! A lazy view is a loader function wrapped in a single-assignment async
//! cell. The first navigation runs the loader; concurrent navigations wait
//! on the same in-flight load; later navigations get the cached view.
//! A failed load leaves the cell empty so the next navigation retries.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::routing::error::ViewLoadError;
use crate::views::View;

/// Future returned by a deferred view loader.
pub type ViewFuture = Pin<Box<dyn Future<Output = Result<View, ViewLoadError>> + Send>>;

/// Function producing the deferred view.
pub type LoadFn = fn() -> ViewFuture;

/// Memoized deferred view.
#[derive(Clone)]
pub struct LazyView {
    chunk: &'static str,
    load: LoadFn,
    cell: Arc<OnceCell<Arc<View>>>,
}

impl LazyView {
    /// `chunk` names the deferred unit for logging.
    pub fn new(chunk: &'static str, load: LoadFn) -> Self {
        Self {
            chunk,
            load,
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub fn chunk(&self) -> &'static str {
        self.chunk
    }

    /// True once the view has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Resolve the view, running the loader at most once on success.
    pub async fn get(&self) -> Result<Arc<View>, ViewLoadError> {
        if let Some(view) = self.cell.get() {
            return Ok(view.clone());
        }

        let view = self
            .cell
            .get_or_try_init(|| async {
                tracing::debug!(chunk = self.chunk, "Loading deferred view");
                let view = (self.load)().await?;
                tracing::info!(chunk = self.chunk, view = %view.name(), "Deferred view loaded");
                Ok::<_, ViewLoadError>(Arc::new(view))
            })
            .await
            .inspect_err(|e| tracing::warn!(chunk = self.chunk, error = %e, "Deferred view load failed"))?;

        Ok(view.clone())
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("chunk", &self.chunk)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
