//! Comic shelf application shell.
//!
//! Client-side routing for the home, about, shelf and reader views, plus a
//! development server that proxies cover images and answers every other
//! path with the view it would render.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::AppConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;
pub use routing::{NavigationError, NavigationRequest, Props, QueryParams, RouteTable, Router};
