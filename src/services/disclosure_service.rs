//! AI condition disclosures
//!
//! Pulls still frames out of a hosted walkthrough video and asks a vision
//! model for a buyer-facing condition statement.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::dto::media_dto::VehicleInfo;
use crate::utils::errors::AppError;

/// Seconds into the video at which frames are sampled
pub const FRAME_TIMESTAMPS: [u32; 5] = [0, 3, 6, 9, 12];

const VIDEO_UPLOAD_SEGMENT: &str = "/video/upload/";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;
const FALLBACK_ANALYSIS: &str = "Unable to analyze video";

/// Frame image URLs for a Cloudinary-hosted video, empty for any other host
pub fn video_frame_urls(video_url: &str) -> Vec<String> {
    if !video_url.contains("cloudinary.com") || !video_url.contains(VIDEO_UPLOAD_SEGMENT) {
        return Vec::new();
    }

    FRAME_TIMESTAMPS
        .iter()
        .map(|seconds| {
            video_url.replacen(
                VIDEO_UPLOAD_SEGMENT,
                &format!("{}so_{},w_800,h_600,c_fill,f_jpg,q_90/", VIDEO_UPLOAD_SEGMENT, seconds),
                1,
            )
        })
        .collect()
}

/// Inspector instructions sent alongside the frames
pub fn inspection_prompt(vehicle: Option<&VehicleInfo>) -> String {
    let vehicle_desc = vehicle
        .map(VehicleInfo::describe)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Vehicle: {}", d))
        .unwrap_or_else(|| "Vehicle details not provided".to_string());

    format!(
        "You are a professional vehicle inspector analyzing a video walkthrough of a vehicle for a wholesale auction listing.

{vehicle_desc}

Please analyze these frames from the vehicle video and provide a detailed condition disclosure. Focus on:

1. **Exterior Condition**: Note any visible damage, dents, scratches, rust, paint issues, or body imperfections
2. **Interior Condition**: Assess seat wear, dashboard condition, carpet/floor mats, headliner, and overall cleanliness
3. **Tires & Wheels**: Note tire tread depth (if visible), wheel condition, any curb rash or damage
4. **Glass**: Check for chips, cracks, or damage to windshield and windows
5. **Lights**: Note condition of headlights, taillights, and any lens cloudiness
6. **Overall Assessment**: Provide an honest overall condition rating (Excellent, Good, Fair, Poor)

Be specific about locations (front left fender, rear bumper, etc.) when noting issues. Be honest and thorough - this is for buyer disclosure purposes.

Format your response as a clear, professional disclosure statement suitable for an auction listing."
    )
}

/// Produces a condition disclosure for a walkthrough video
#[async_trait]
pub trait DisclosureAnalyzer: Send + Sync {
    async fn analyze(&self, video_url: &str, vehicle: Option<&VehicleInfo>) -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl MessagesResponse {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
    }
}

/// Claude vision client for condition disclosures
pub struct AnthropicDisclosureAnalyzer {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl AnthropicDisclosureAnalyzer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Fetch one frame as base64, `None` on any failure
    async fn fetch_frame(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::warn!("⚠️ Frame {} returned {}", url, response.status());
                return None;
            }
            Err(e) => {
                log::warn!("⚠️ Error fetching frame {}: {}", url, e);
                return None;
            }
        };

        match response.bytes().await {
            Ok(bytes) => Some(STANDARD.encode(bytes)),
            Err(e) => {
                log::warn!("⚠️ Error reading frame {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl DisclosureAnalyzer for AnthropicDisclosureAnalyzer {
    async fn analyze(&self, video_url: &str, vehicle: Option<&VehicleInfo>) -> Result<String, AppError> {
        let frame_urls = video_frame_urls(video_url);
        if frame_urls.is_empty() {
            return Err(AppError::BadRequest("Invalid video URL".to_string()));
        }

        log::info!("🎞️ Fetching {} frames from {}", frame_urls.len(), video_url);
        let frames: Vec<String> = futures::future::join_all(frame_urls.iter().map(|url| self.fetch_frame(url)))
            .await
            .into_iter()
            .flatten()
            .collect();

        if frames.is_empty() {
            return Err(AppError::BadRequest("Could not extract frames from video".to_string()));
        }

        let mut content: Vec<ContentBlock> = frames
            .into_iter()
            .map(|data| ContentBlock::Image {
                source: ImageSource {
                    source_type: "base64",
                    media_type: "image/jpeg",
                    data,
                },
            })
            .collect();
        content.push(ContentBlock::Text {
            text: inspection_prompt(vehicle),
        });

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message { role: "user", content }],
        };

        log::info!("🤖 Requesting condition analysis from {}", self.model);
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to analyze video: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Analysis failed with status {}: {}", status, error_text);
            return Err(AppError::ExternalApi("Failed to analyze video".to_string()));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse analysis response: {}", e)))?;

        Ok(body.first_text().unwrap_or_else(|| FALLBACK_ANALYSIS.to_string()))
    }
}
