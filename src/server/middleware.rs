// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::config::ServerConfig;
use crate::error::GatewayError;
use crate::metrics;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{debug, warn};

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// CORS for the configured web origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight instead of using wildcards.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Paths reachable without the `api-key` header
fn is_public(method: &Method, path: &str) -> bool {
    method == Method::OPTIONS || path == "/" || path.starts_with("/docs")
}

/// Reject requests whose `api-key` header does not match the configured key.
///
/// An empty configured key disables the check.
pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = state.config.auth.api_key.as_str();
    if expected.is_empty() || is_public(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get("api-key")
        .and_then(|value| value.to_str().ok());

    if provided != Some(expected) {
        debug!("Rejected {} {}: invalid API key", request.method(), request.uri().path());
        return GatewayError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Record request count and latency per matched route
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    metrics::record_request(
        &method,
        &endpoint,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
