//! CORS middleware
//!
//! Permissive in development, restricted to `CORS_ORIGINS` otherwise. An
//! empty list outside development allows no cross-origin callers.

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::environment::EnvironmentConfig;

/// Pick the CORS layer for the running environment
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if config.is_development() {
        return cors_middleware();
    }

    if config.cors_origins.is_empty() {
        tracing::warn!("⚠️ CORS_ORIGINS not set, cross-origin requests will be refused");
    }
    cors_middleware_with_origins(&config.cors_origins)
}

/// Allow any origin - development only
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS restricted to the given origins
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
