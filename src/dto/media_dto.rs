use serde::{Deserialize, Serialize};

// Query for VIN decoding
#[derive(Debug, Default, Deserialize)]
pub struct VinDecodeQuery {
    pub vin: Option<String>,
}

// Result of a VIN decode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecodedVin {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
}

// Hosted video after an upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}

// Vehicle description passed to the condition analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
}

impl VehicleInfo {
    /// "2019 Honda Accord EX"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        for part in [&self.make, &self.model, &self.trim].into_iter().flatten() {
            if !part.trim().is_empty() {
                parts.push(part.trim().to_string());
            }
        }
        parts.join(" ")
    }
}

// Request to analyze a vehicle walkthrough video
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeVideoRequest {
    pub video_url: Option<String>,
    pub vehicle_info: Option<VehicleInfo>,
}

// AI-generated condition disclosure
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeVideoResponse {
    pub analysis: String,
}
