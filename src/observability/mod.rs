//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, http, config produce:
//!     → tracing events with structured fields
//!     → logging.rs (subscriber: env filter + fmt layer)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Navigations and proxy hops log at debug; reloads and startup at info

pub mod logging;

pub use logging::init_logging;
