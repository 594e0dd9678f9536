//! HTTP routes
//!
//! Admin routers (vehicles, sale events, media) sit behind the admin key;
//! the storefront and health check are public.

pub mod listing_routes;
pub mod media_routes;
pub mod sale_event_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, require_admin};
use crate::state::AppState;

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/sale-events", sale_event_routes::create_sale_event_router())
        .merge(media_routes::create_media_router(state.config.max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public = Router::new()
        .route("/health", get(health))
        .merge(listing_routes::create_listing_router());

    Router::new()
        .merge(public)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
