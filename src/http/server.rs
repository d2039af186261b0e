//! HTTP server setup and the proxy handler.
//!
//! # Responsibilities
//! - Build the Axum router with the catch-all proxy handler
//! - Wire up middleware (request timeout, request ID, tracing)
//! - Look up the routing rule for each inbound request
//! - Rewrite and forward matched requests, streaming both bodies
//! - Map failures to client-visible 404/502/504 responses
//! - Log every routing decision (matched or not)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header::HOST, HeaderValue, Request},
    response::Response,
    routing::any,
    Router,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::loader::ConfigError;
use crate::config::schema::{RewritePolicy, RouterConfig};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::response;
use crate::http::rewrite;
use crate::routing::RuleTable;

/// Application state injected into the proxy handler.
///
/// Everything here is read-only for the server's lifetime; concurrent
/// handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RuleTable>,
    pub client: Client<HttpsConnector<HttpConnector>, Body>,
    pub rewrite: RewritePolicy,
    pub upstream_timeout: Duration,
}

/// HTTP server for the ingress router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compile the rule table and build the server.
    ///
    /// Fails on any invalid backend URL, before the listener binds; an
    /// un-forwardable rule must be a startup error, not a runtime 404.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let table = Arc::new(RuleTable::from_config(&config.routes)?);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        // The TLS wrapper handles scheme dispatch, so the inner connector
        // must accept https URIs too.
        connector.enforce_http(false);

        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            table,
            client,
            rewrite: config.rewrite,
            upstream_timeout: Duration::from_secs(config.upstream_timeout_secs),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        // The inbound request timeout sits above the upstream timeout so
        // the upstream deadline fires first and yields a proper 504.
        let request_timeout = Duration::from_secs(config.upstream_timeout_secs + 5);

        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
            .layer(RequestIdLayer)
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
///
/// Looks up the rule for the request authority and path, rewrites the
/// destination, and relays the backend's response without buffering.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let host = request_authority(&request);
    let path = request.uri().path().to_string();

    let rule = match host.as_deref().and_then(|h| state.table.lookup(h, &path)) {
        Some(rule) => rule,
        None => {
            tracing::warn!(
                request_id = %request_id,
                host = host.as_deref().unwrap_or("-"),
                path = %path,
                outcome = "no_match",
                "no rule matched"
            );
            return response::not_found();
        }
    };

    let host = host.unwrap_or_default();
    let (mut parts, body) = request.into_parts();

    parts.uri = match rewrite::upstream_uri(&rule.backend, &parts.uri, state.rewrite) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                host = %host,
                path = %path,
                backend = %rule.backend,
                error = %e,
                outcome = "rewrite_error",
                "destination rewrite failed"
            );
            return response::bad_gateway();
        }
    };

    // The Host header sent upstream is the backend's authority, not the
    // client's.
    let authority = rewrite::upstream_authority(&rule.backend);
    match HeaderValue::from_str(&authority) {
        Ok(value) => {
            parts.headers.insert(HOST, value);
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                backend = %rule.backend,
                error = %e,
                outcome = "rewrite_error",
                "backend authority is not a valid header value"
            );
            return response::bad_gateway();
        }
    }

    let upstream_request = Request::from_parts(parts, body);

    match tokio::time::timeout(
        state.upstream_timeout,
        state.client.request(upstream_request),
    )
    .await
    {
        Ok(Ok(upstream_response)) => {
            let status = upstream_response.status();
            tracing::info!(
                request_id = %request_id,
                host = %host,
                path = %path,
                backend = %rule.backend,
                status = %status,
                outcome = "forwarded",
                "routed request"
            );
            // Hand the hyper body straight back; the response streams
            // through without buffering.
            let (parts, body) = upstream_response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Ok(Err(e)) => {
            tracing::error!(
                request_id = %request_id,
                host = %host,
                path = %path,
                backend = %rule.backend,
                error = %e,
                outcome = "upstream_error",
                "upstream request failed"
            );
            response::bad_gateway()
        }
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                host = %host,
                path = %path,
                backend = %rule.backend,
                timeout = ?state.upstream_timeout,
                outcome = "upstream_timeout",
                "upstream request timed out"
            );
            response::gateway_timeout()
        }
    }
}

/// Authority the request was addressed to: the URI authority (HTTP/2) or
/// the Host header (HTTP/1.1), exactly as received. No normalization.
fn request_authority(request: &Request<Body>) -> Option<String> {
    if let Some(authority) = request.uri().authority() {
        return Some(authority.as_str().to_string());
    }
    request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Resolve when either Ctrl+C arrives or the shutdown channel fires.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "failed to listen for Ctrl+C");
            } else {
                tracing::info!("shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("shutdown triggered");
        }
    }
}
