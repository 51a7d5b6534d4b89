//! CORS layer built from the configured origin allow-list.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use ampflux_core::config::server::CorsConfig;

/// Build the CORS layer.
///
/// Credentials (auth cookies) are allowed, which rules out wildcard origins:
/// only the configured allow-list is honored. Headers are restricted to the
/// configured set (`authorization`, `content-type` by default).
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
