//! Application views and the route table that exposes them.
//!
//! | Path      | Name   | Loading                         |
//! |-----------|--------|---------------------------------|
//! | `/`       | home   | eager                           |
//! | `/about`  | about  | lazy, deferred `about` chunk    |
//! | `/shelf`  | shelf  | eager                           |
//! | `/reader` | reader | eager, `comicUrl` prop from query |

use serde::Serialize;

use crate::routing::{Props, QueryParams, Route, RouteTable, RouteTableError, ViewFuture};

/// A renderable unit of UI associated with a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    name: String,
    title: String,
    /// Names of the props this view accepts.
    inputs: Vec<String>,
}

impl View {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }
}

/// Query parameter and prop carrying the comic archive URL.
pub const COMIC_URL: &str = "comicUrl";

pub fn home_view() -> View {
    View::new("home", "Home")
}

pub fn shelf_view() -> View {
    View::new("shelf", "Comic Shelf")
}

pub fn reader_view() -> View {
    View::new("reader", "Comic Reader").with_input(COMIC_URL)
}

// Deferred chunk for the about page.
fn load_about() -> ViewFuture {
    Box::pin(async {
        tokio::task::yield_now().await;
        Ok(View::new("about", "About"))
    })
}

fn reader_props(query: &QueryParams) -> Props {
    Props::project(query, COMIC_URL)
}

/// The application's route table.
pub fn app_routes() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(vec![
        Route::eager("/", "home", home_view()),
        Route::lazy("/about", "about", "about", load_about),
        Route::eager("/shelf", "shelf", shelf_view()),
        Route::eager("/reader", "reader", reader_view()).with_props(reader_props),
    ])
}
