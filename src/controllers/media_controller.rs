use std::sync::Arc;

use crate::dto::media_dto::{AnalyzeVideoRequest, AnalyzeVideoResponse, DecodedVin, UploadResponse, VinDecodeQuery};
use crate::services::disclosure_service::video_frame_urls;
use crate::services::video_upload_service::{is_allowed_video, ALLOWED_VIDEO_EXTENSIONS};
use crate::services::{DisclosureAnalyzer, VideoStorage, VinDecoder};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::{normalize_vin, VIN_LENGTH};

/// Pass-through endpoints to the external collaborators
pub struct MediaController {
    vin_decoder: Arc<dyn VinDecoder>,
    video_storage: Option<Arc<dyn VideoStorage>>,
    disclosure_analyzer: Option<Arc<dyn DisclosureAnalyzer>>,
}

impl MediaController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vin_decoder: state.vin_decoder.clone(),
            video_storage: state.video_storage.clone(),
            disclosure_analyzer: state.disclosure_analyzer.clone(),
        }
    }

    pub async fn decode_vin(&self, query: VinDecodeQuery) -> Result<DecodedVin, AppError> {
        let vin = query
            .vin
            .as_deref()
            .map(normalize_vin)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| bad_request_error("VIN is required"))?;

        if vin.chars().count() != VIN_LENGTH {
            return Err(AppError::BadRequest(format!("VIN must be {} characters", VIN_LENGTH)));
        }

        self.vin_decoder.decode(&vin).await?.ok_or_else(|| {
            AppError::NotFound("Could not decode VIN. Please check if the VIN is valid.".to_string())
        })
    }

    pub async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<UploadResponse, AppError> {
        if bytes.is_empty() {
            return Err(bad_request_error("No file provided"));
        }
        if !is_allowed_video(&file_name) {
            return Err(AppError::BadRequest(format!(
                "Unsupported video format, expected one of: {}",
                ALLOWED_VIDEO_EXTENSIONS.join(", ")
            )));
        }

        let storage = self
            .video_storage
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("Video upload is not configured".to_string()))?;

        storage.upload_video(&file_name, bytes).await
    }

    pub async fn analyze(&self, request: AnalyzeVideoRequest) -> Result<AnalyzeVideoResponse, AppError> {
        let video_url = request
            .video_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| bad_request_error("Video URL is required"))?;

        let analyzer = self
            .disclosure_analyzer
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("AI analysis is not configured".to_string()))?;

        if video_frame_urls(&video_url).is_empty() {
            return Err(bad_request_error("Invalid video URL"));
        }

        let analysis = analyzer.analyze(&video_url, request.vehicle_info.as_ref()).await?;
        Ok(AnalyzeVideoResponse { analysis })
    }
}
