use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::controllers::listing_controller::ListingController;
use crate::dto::listing_dto::ResultsResponse;
use crate::models::vehicle::VehicleWithEvent;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ApiPath;

pub fn create_listing_router() -> Router<AppState> {
    Router::new()
        .route("/api/listings", get(list_listings))
        .route("/api/listings/:id", get(get_listing))
        .route("/api/results", get(get_results))
}

async fn list_listings(State(state): State<AppState>) -> Result<Json<Vec<VehicleWithEvent>>, AppError> {
    let controller = ListingController::new(&state);
    Ok(Json(controller.listings(Utc::now()).await?))
}

async fn get_listing(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<VehicleWithEvent>, AppError> {
    let controller = ListingController::new(&state);
    Ok(Json(controller.detail(id).await?))
}

async fn get_results(State(state): State<AppState>) -> Result<Json<ResultsResponse>, AppError> {
    let controller = ListingController::new(&state);
    Ok(Json(controller.results().await?))
}
