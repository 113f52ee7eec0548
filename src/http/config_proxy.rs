//! The config proxy function.
//!
//! `GET` returns the backend config resolved from the environment on every
//! call; any other method is refused with `405`. The body of a refused
//! request is never read.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, header::InvalidHeaderValue, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::backend::env::{resolve_backend_config, EnvResolution, Environment};
use crate::config::ProxyConfig;
use crate::http::request::request_id_of;
use crate::http::response::{json_error, method_not_allowed};
use crate::observability::metrics;

const CONFIG_UNAVAILABLE: &str = "Firebase configuration not available";

/// State shared by the proxy handlers.
#[derive(Debug, Clone)]
pub struct ProxyState {
    env: Environment,
    allow_origin: HeaderValue,
    cache_control: HeaderValue,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig, env: Environment) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            env,
            allow_origin: HeaderValue::from_str(&config.allow_origin)?,
            cache_control: HeaderValue::from_str(&format!(
                "public, max-age={}",
                config.cache_max_age_secs
            ))?,
        })
    }
}

/// Router serving the proxy function at `route`.
pub fn proxy_router(route: &str, state: ProxyState) -> Router {
    Router::new()
        .route(route, get(get_backend_config).fallback(reject_method))
        .with_state(state)
}

async fn get_backend_config(
    State(state): State<ProxyState>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&headers);

    let response = match resolve_backend_config(&state.env) {
        EnvResolution::Complete(config) => {
            tracing::debug!(
                request_id = %request_id,
                project_id = %config.project_id,
                "Serving backend config"
            );
            let mut response = Json(config).into_response();
            let headers = response.headers_mut();
            headers.insert(header::CACHE_CONTROL, state.cache_control.clone());
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                state.allow_origin.clone(),
            );
            response
        }
        EnvResolution::Missing(missing) => {
            tracing::error!(
                request_id = %request_id,
                missing = ?missing,
                "{}", CONFIG_UNAVAILABLE
            );
            json_error(StatusCode::INTERNAL_SERVER_ERROR, CONFIG_UNAVAILABLE)
        }
    };

    metrics::record_proxy_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn reject_method(method: Method, headers: HeaderMap) -> Response {
    let start = Instant::now();
    tracing::warn!(
        request_id = %request_id_of(&headers),
        method = %method,
        "Rejected config request method"
    );
    let response = method_not_allowed("GET");
    metrics::record_proxy_request(method.as_str(), response.status().as_u16(), start);
    response
}
