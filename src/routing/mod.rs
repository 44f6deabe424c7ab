//! Client-side routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location string / named navigation
//!     → query.rs (NavigationRequest: path + QueryParams)
//!     → table.rs (exact path lookup)
//!     → route.rs (eager view, or lazy.rs memoized load)
//!     → route.rs (props derivation from query)
//!     → router.rs (commit unless superseded, push history.rs)
//!     → ActiveView
//!
//! Route Compilation (at startup):
//!     Route[]
//!     → Reject duplicate paths / names
//!     → Index by path and by name
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Exact path matching only; declaration order does not matter
//! - Deferred views load at most once, concurrent callers share the load
//! - Last navigation wins

pub mod error;
pub mod history;
pub mod lazy;
pub mod query;
pub mod route;
pub mod router;
pub mod table;

pub use error::{NavigationError, RouteNotFoundError, RouteTableError, ViewLoadError};
pub use history::{History, HistoryEntry};
pub use lazy::{LazyView, LoadFn, ViewFuture};
pub use query::{NavigationRequest, Props, QueryParams};
pub use route::{PropsDeriver, Route, ViewLoader};
pub use router::{ActiveView, Router};
pub use table::{Resolved, RouteTable};
