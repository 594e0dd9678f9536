use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, RelistVehicleRequest, SellVehicleRequest, UpdateVehicleRequest, VehicleFilters,
};
use crate::dto::ApiResponse;
use crate::models::vehicle::{Vehicle, VehicleWithEvent};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{ApiJson, ApiPath, ApiQuery, OptionalJson};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).patch(update_vehicle))
        .route("/:id/sell", post(sell_vehicle))
        .route("/:id/relist", post(relist_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<VehicleFilters>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<VehicleWithEvent>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleWithEvent>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(id, request).await?))
}

async fn sell_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SellVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleWithEvent>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.sell(id, request).await?))
}

async fn relist_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    OptionalJson(request): OptionalJson<RelistVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleWithEvent>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.relist(id, request).await?))
}
