//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the config proxy and health routes
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop gracefully on OS signal or `Shutdown::trigger`

use std::time::Duration;

use axum::{http::header::InvalidHeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::env::Environment;
use crate::config::ServiceConfig;
use crate::http::config_proxy::{proxy_router, ProxyState};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::signals::shutdown_signal;

/// Errors building the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid proxy header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// HTTP server for the config proxy.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server reading backend credentials from `env`.
    pub fn new(config: ServiceConfig, env: Environment) -> Result<Self, ServerError> {
        let state = ProxyState::new(&config.proxy, env)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: ProxyState) -> Router {
        proxy_router(&config.proxy.route, state)
            .route("/health", get(health))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.proxy.request_timeout_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until an OS signal or a shutdown broadcast arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.proxy.route,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
