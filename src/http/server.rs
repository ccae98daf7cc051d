//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one mount per configured provider
//! - Wire up middleware (tracing, request ID, concurrency limit)
//! - Enforce the request deadline and body limit inside the handler, so
//!   those failures share the `{code, message}` shape and reach metrics
//! - Bind server to listener
//! - Forward requests to the provider's upstream
//! - Observability (metrics, request IDs)

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ProviderConfig, ProxyConfig};
use crate::error::ProxyError;
use crate::http::request::{carries_body, enforce_body_limit, read_json_body, request_id};
use crate::http::response::passthrough;
use crate::observability::metrics;
use crate::upstream::{Forwarder, OutboundRequest, ProxyTarget};

/// Per-provider state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ProviderConfig>,
    pub mount: Arc<str>,
    pub forwarder: Forwarder,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

/// HTTP server for the research proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given (already resolved) configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let forwarder = Forwarder::new(&config.timeouts, &config.client)?;
        let router = Self::build_router(&config, forwarder);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, forwarder: Forwarder) -> Router {
        let mut router = Router::new().route("/health", get(health_handler));

        for provider in &config.providers {
            let mount = provider.mount_path();
            let state = AppState {
                provider: Arc::new(provider.clone()),
                mount: Arc::from(mount.as_str()),
                forwarder: forwarder.clone(),
                max_body_size: config.security.max_body_size,
                request_timeout: Duration::from_secs(config.timeouts.request_secs),
            };

            tracing::info!(
                provider = %provider.name,
                mount = %mount,
                upstream = %provider.base_url,
                "Provider mounted"
            );

            let provider_routes = Router::new()
                .route(
                    &format!("{}/{{*slug}}", mount),
                    get(proxy_handler)
                        .post(proxy_handler)
                        .put(proxy_handler)
                        .delete(proxy_handler),
                )
                .with_state(state);
            router = router.merge(provider_routes);
        }

        // Router::layer wraps every endpoint separately; the global layer
        // shares one semaphore across all of them.
        router
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request.headers()),
                    )
                }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until the shutdown receiver fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            providers = self.config.providers.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Main proxy handler.
/// Builds the upstream request for one provider and relays the response.
async fn proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let start_time = Instant::now();
    let method = request.method().clone();
    let request_id = request_id(request.headers()).to_string();

    let result = match tokio::time::timeout(state.request_timeout, forward(&state, request)).await
    {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Timeout(state.request_timeout)),
    };

    let status = match &result {
        Ok(response) => response.status(),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                provider = %state.provider.name,
                error = %e,
                "Proxy request failed"
            );
            e.status()
        }
    };
    metrics::record_request(&state.provider.name, method.as_str(), status.as_u16(), start_time);

    result
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let tail = parts
        .uri
        .path()
        .strip_prefix(&*state.mount)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_default();
    let segments: Vec<&str> = tail.split('/').collect();

    let target = ProxyTarget::new(
        &state.provider.base_url,
        &state.provider.api_path,
        segments.as_slice(),
        parts.uri.query(),
    )?;

    tracing::info!(
        provider = %state.provider.name,
        method = %parts.method,
        upstream_url = %target.url(),
        "Forwarding request"
    );

    let body = if carries_body(&parts.method) {
        enforce_body_limit(&parts.headers, state.max_body_size)?;
        read_json_body(body, state.max_body_size).await?
    } else {
        None
    };

    let outbound = OutboundRequest::new(parts.method, &parts.headers, target, body)?;
    let upstream = state.forwarder.send(outbound).await?;

    tracing::debug!(
        provider = %state.provider.name,
        status = %upstream.status(),
        "Upstream responded"
    );

    passthrough(upstream)
}
