use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::media_controller::MediaController;
use crate::dto::media_dto::{AnalyzeVideoRequest, AnalyzeVideoResponse, DecodedVin, UploadResponse, VinDecodeQuery};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::extract::{ApiJson, ApiQuery};

pub fn create_media_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/vin-decode", get(decode_vin))
        .route(
            "/api/upload",
            post(upload_video).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/analyze-video", post(analyze_video))
}

async fn decode_vin(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VinDecodeQuery>,
) -> Result<Json<DecodedVin>, AppError> {
    let controller = MediaController::new(&state);
    Ok(Json(controller.decode_vin(query).await?))
}

async fn upload_video(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let controller = MediaController::new(&state);
    let mut multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read uploaded file: {}", e)))?;

        return Ok(Json(controller.upload(file_name, bytes.to_vec()).await?));
    }

    Err(bad_request_error("No file provided"))
}

async fn analyze_video(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeVideoRequest>,
) -> Result<Json<AnalyzeVideoResponse>, AppError> {
    let controller = MediaController::new(&state);
    Ok(Json(controller.analyze(request).await?))
}
