//! comic-shelf command line.
//!
//! ```text
//! comic-shelf [--config PATH] serve              dev server (proxy + history fallback)
//! comic-shelf [--config PATH] resolve LOCATION   print the view a location renders
//! comic-shelf [--config PATH] routes             list the route table
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use comic_shelf::config::{load_config, AppConfig, ConfigWatcher};
use comic_shelf::observability::init_logging;
use comic_shelf::routing::{History, Router};
use comic_shelf::views::app_routes;
use comic_shelf::{DevServer, Shutdown};

#[derive(Parser)]
#[command(name = "comic-shelf")]
#[command(about = "Comic shelf application shell and dev server", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the development server
    Serve,
    /// Resolve a location such as `/reader?comicUrl=...`
    Resolve { location: String },
    /// List the route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability);

    let routes = Arc::new(app_routes()?);

    match cli.command {
        Commands::Serve => {
            tracing::info!("comic-shelf v0.1.0 starting");

            // Keep the watcher alive for the lifetime of the server.
            let (_watcher, rule_updates) = match &cli.config {
                Some(path) => {
                    let (watcher, updates) = ConfigWatcher::new(path, config.clone());
                    (Some(watcher.run()?), updates)
                }
                None => {
                    let (_, updates) = mpsc::unbounded_channel();
                    (None, updates)
                }
            };

            tracing::info!(
                bind_address = %config.dev_server.bind_address,
                routes = routes.len(),
                "Configuration loaded"
            );

            let listener = TcpListener::bind(&config.dev_server.bind_address).await?;
            let shutdown = Shutdown::new();
            shutdown.trigger_on_ctrl_c();
            let server = DevServer::new(config, routes);
            server.run(listener, rule_updates, shutdown.subscribe()).await?;

            tracing::info!("Shutdown complete");
        }
        Commands::Resolve { location } => {
            let router = Router::with_history(routes, History::new(config.history_base.as_str()));
            let resolved = router.push(&location).await?;
            let output = json!({
                "route": resolved.route,
                "href": router.current_location(),
                "view": &*resolved.view,
                "props": resolved.props,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Routes => {
            for route in routes.iter() {
                let loading = if route.loader().is_lazy() { "lazy" } else { "eager" };
                println!("{:<10} {:<8} {}", route.path(), route.name(), loading);
            }
        }
    }

    Ok(())
}
