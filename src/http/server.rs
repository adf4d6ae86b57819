//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single edge handler
//! - Wire up middleware (request ID, tracing, timeout, CORS stamping)
//! - Bind server to listener
//! - Answer OPTIONS through the CORS negotiator
//! - Walk the dispatch table and call upstreams for everything else

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::EdgeConfig;
use crate::http::middleware::cors;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response;
use crate::routing::{Action, DispatchTable};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatch: Arc<DispatchTable>,
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the edge router.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
}

impl EdgeServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstreams, &config.timeouts)?;

        let state = AppState {
            dispatch: Arc::new(DispatchTable::standard()),
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request deadline answers 504; upstream stalls are normally cut
    /// earlier by the client timeout and answered 502.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        let [allow_origin, allow_methods] = cors::response_header_layers();

        Router::new()
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(allow_methods)
            .layer(allow_origin)
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Main edge handler.
///
/// OPTIONS is settled by the CORS negotiator. Everything else runs every
/// matching dispatch rule in order, each one replacing the previous response.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();

    if let Some(response) = cors::classify_and_respond(&parts.method, &parts.headers) {
        tracing::debug!(request_id = %request_id, "Answered OPTIONS");
        return response;
    }

    let path = parts.uri.path();
    let mut current = None;

    for rule in state.dispatch.matching(&parts.method, path) {
        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            path = %path,
            rule = rule.name(),
            "Dispatch rule matched"
        );

        match run_action(&state, rule.action(), &parts.method, parts.uri.query()).await {
            Ok(response) => current = Some(response),
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    rule = rule.name(),
                    error = %e,
                    "Upstream error"
                );
                return response::upstream_failure();
            }
        }
    }

    current.unwrap_or_else(|| {
        tracing::warn!(request_id = %request_id, path = %path, "No dispatch rule matched");
        response::expected_get()
    })
}

async fn run_action(
    state: &AppState,
    action: Action,
    method: &Method,
    query: Option<&str>,
) -> Result<Response, UpstreamError> {
    match action {
        Action::Greeting => Ok(response::greeting()),
        Action::News => {
            let body = state.upstream.fetch_news().await?;
            Ok(response::passthrough(body))
        }
        Action::ExchangeRate => {
            let from = query_param(query, "from_currency");
            let to = query_param(query, "to_currency");
            let body = state
                .upstream
                .fetch_exchange_rate(from.as_deref(), to.as_deref())
                .await?;
            Ok(response::passthrough(body))
        }
        Action::RejectMethod => {
            tracing::debug!(method = %method, "Rejecting method");
            Ok(response::expected_get())
        }
    }
}

/// First value of `name` in a raw query string.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
