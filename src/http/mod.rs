//! Development HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, trace)
//!     → proxy.rs (path prefix match?)
//!         yes → forward to upstream (Host rewritten when configured)
//!         no  → history fallback: routing table resolves the path
//!     → Send to client
//! ```

pub mod proxy;
pub mod server;

pub use proxy::{ProxyTable, ProxyTarget};
pub use server::DevServer;
