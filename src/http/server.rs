//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the liveness route and 404 fallback
//! - Wire up middleware (request ID, tracing, CORS, timeout)
//! - Serve on a bound listener until shutdown is signalled

use axum::{body::Body, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{ConfigError, ServiceConfig, ValidationError};
use crate::health;
use crate::http::cors::cors_layer;
use crate::http::request::{make_request_span, MakeRequestUuid};
use crate::http::response::not_found;

/// Identity of the running service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub env: String,
    pub version: &'static str,
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ServiceInfo>,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            service: Arc::new(ServiceInfo {
                name: config.app.service_name.clone(),
                env: config.app.env.clone(),
                version: env!("CARGO_PKG_VERSION"),
            }),
        }
    }
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let router = Self::build_router(&config)
            .map_err(|e| ConfigError::Validation(vec![e]))?;
        Ok(Self { router, config })
    }

    fn build_router(config: &ServiceConfig) -> Result<Router, ValidationError> {
        let routes = Router::new()
            .route("/health", get(health::health))
            .fallback(not_found)
            .with_state(AppState::from_config(config));
        with_middleware(routes, config)
    }

    /// Router with all middleware, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on the given listener until `shutdown` fires, then
    /// drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.app.service_name,
            env = %self.config.app.env,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wrap `routes` in the middleware stack.
///
/// Layers run outermost first: request id, trace span, id propagation,
/// CORS, timeout.
#[allow(deprecated)]
fn with_middleware(routes: Router, config: &ServiceConfig) -> Result<Router, ValidationError> {
    let cors = cors_layer(&config.cors)?;

    let trace = TraceLayer::new_for_http()
        .make_span_with(make_request_span::<Body>)
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(routes
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
