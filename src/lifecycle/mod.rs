//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build route table → Start watcher → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger() → dev server stops accepting → in-flight requests drain → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
