//! Development server setup.
//!
//! # Responsibilities
//! - Create Axum Router with the dev handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Forward proxied prefixes to their upstreams
//! - Answer every other GET with the history fallback (the route that renders),
//!   with the history base stripped from the path
//! - Swap proxy rules when a new config arrives

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode, Version},
    response::{IntoResponse, Response},
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, ProxyRule};
use crate::http::proxy::{ProxyTable, ProxyTarget};
use crate::routing::history::{normalize_base, strip_base};
use crate::routing::{
    NavigationError, NavigationRequest, QueryParams, RouteNotFoundError, RouteTable,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub proxies: Arc<ArcSwap<ProxyTable>>,
    pub client: Client<HttpConnector, Body>,
    /// Normalized history base; route paths live under it.
    pub history_base: Arc<str>,
}

/// Development server: asset proxy plus history fallback.
pub struct DevServer {
    router: Router,
    proxies: Arc<ArcSwap<ProxyTable>>,
}

impl DevServer {
    pub fn new(config: AppConfig, routes: Arc<RouteTable>) -> Self {
        let proxies = Arc::new(ArcSwap::from_pointee(ProxyTable::from_rules(
            &config.dev_server.proxy,
        )));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            routes,
            proxies: proxies.clone(),
            client,
            history_base: normalize_base(&config.history_base).into(),
        };

        let router = Self::build_router(&config, state);
        Self { router, proxies }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dev_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.dev_server.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires.
    ///
    /// `rule_updates` carries replacement proxy rules from the config watcher.
    pub async fn run(
        self,
        listener: TcpListener,
        mut rule_updates: mpsc::UnboundedReceiver<Vec<ProxyRule>>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            proxy_rules = self.proxies.load().len(),
            "Dev server starting"
        );

        let proxies = self.proxies.clone();
        tokio::spawn(async move {
            while let Some(rules) = rule_updates.recv().await {
                let table = ProxyTable::from_rules(&rules);
                tracing::info!(proxy_rules = table.len(), "Proxy rules reloaded");
                proxies.store(Arc::new(table));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }
}

async fn dev_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let target = state
        .proxies
        .load()
        .match_path(request.uri().path())
        .cloned();

    match target {
        Some(target) => forward(&state.client, &target, request).await,
        None => history_fallback(&state.routes, &state.history_base, request).await,
    }
}

/// Forward a request to the upstream named by `target`.
async fn forward(
    client: &Client<HttpConnector, Body>,
    target: &ProxyTarget,
    request: Request<Body>,
) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (mut parts, body) = request.into_parts();
    let uri = match target.upstream_uri(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        prefix = target.prefix(),
        upstream = %uri,
        "Proxying request"
    );

    parts.uri = uri;
    parts.version = Version::HTTP_11;
    if let Some(host) = target.rewritten_host() {
        parts.headers.insert(header::HOST, host.clone());
    }

    match client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Describe the view the browser would render for this location.
async fn history_fallback(
    routes: &RouteTable,
    history_base: &str,
    request: Request<Body>,
) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let uri = request.uri();
    let query = uri.query().map(QueryParams::parse).unwrap_or_default();
    let result = match strip_base(history_base, uri.path()) {
        Some(path) => routes.resolve(NavigationRequest::new(path).with_query(query)).await,
        None => Err(NavigationError::NotFound(RouteNotFoundError {
            path: uri.path().to_string(),
        })),
    };

    match result {
        Ok(resolved) => Json(json!({
            "route": resolved.route,
            "location": resolved.full_path(),
            "view": &*resolved.view,
            "props": resolved.props,
        }))
        .into_response(),
        Err(e) => {
            let status = match &e {
                NavigationError::NotFound(_) => StatusCode::NOT_FOUND,
                NavigationError::ViewLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            tracing::warn!(error = %e, status = %status, "History fallback failed");
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
