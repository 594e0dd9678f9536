use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::sale_event_controller::SaleEventController;
use crate::dto::sale_event_dto::{CreateSaleEventRequest, SaleEventDetailResponse, UpdateSaleEventRequest};
use crate::dto::ApiResponse;
use crate::models::sale_event::SaleEvent;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath};

pub fn create_sale_event_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sale_events).post(create_sale_event))
        .route("/:id", get(get_sale_event).patch(update_sale_event))
}

async fn list_sale_events(State(state): State<AppState>) -> Result<Json<Vec<SaleEvent>>, AppError> {
    let controller = SaleEventController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn create_sale_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSaleEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleEvent>>), AppError> {
    let controller = SaleEventController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_sale_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SaleEventDetailResponse>, AppError> {
    let controller = SaleEventController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_sale_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateSaleEventRequest>,
) -> Result<Json<ApiResponse<SaleEvent>>, AppError> {
    let controller = SaleEventController::new(&state);
    Ok(Json(controller.update(id, request).await?))
}
