use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::dto::media_dto::UploadResponse;
use crate::utils::errors::AppError;

/// Video formats accepted for walkthrough uploads
pub const ALLOWED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];

/// Whether `file_name` carries an accepted video extension
pub fn is_allowed_video(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Stores uploaded vehicle videos with a media host
#[async_trait]
pub trait VideoStorage: Send + Sync {
    async fn upload_video(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse, AppError>;
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResult {
    secure_url: String,
    public_id: String,
}

/// Cloudinary video upload through an unsigned upload preset
pub struct CloudinaryVideoStorage {
    api_url: String,
    cloud_name: String,
    upload_preset: String,
    folder: String,
    client: reqwest::Client,
}

impl CloudinaryVideoStorage {
    pub fn new(
        api_url: impl Into<String>,
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
        folder: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
            folder: folder.into(),
            client,
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/video/upload", self.api_url, self.cloud_name)
    }
}

#[async_trait]
impl VideoStorage for CloudinaryVideoStorage {
    async fn upload_video(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse, AppError> {
        log::info!("📤 Uploading video {} ({} bytes)", file_name, bytes.len());

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to upload video: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Upload failed with status {}: {}", status, error_text);
            return Err(AppError::ExternalApi("Failed to upload video".to_string()));
        }

        let result: CloudinaryUploadResult = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse upload response: {}", e)))?;

        log::info!("✅ Video stored as {}", result.public_id);
        Ok(UploadResponse {
            url: result.secure_url,
            public_id: result.public_id,
        })
    }
}
