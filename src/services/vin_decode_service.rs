use async_trait::async_trait;
use serde::Deserialize;

use crate::dto::media_dto::DecodedVin;
use crate::utils::errors::AppError;

/// Decodes a VIN into year/make/model/trim.
///
/// `Ok(None)` means the upstream answered but could not identify the vehicle.
#[async_trait]
pub trait VinDecoder: Send + Sync {
    async fn decode(&self, vin: &str) -> Result<Option<DecodedVin>, AppError>;
}

#[derive(Debug, Deserialize)]
struct NhtsaResponse {
    #[serde(rename = "Results")]
    results: Vec<NhtsaResult>,
}

#[derive(Debug, Deserialize)]
struct NhtsaResult {
    #[serde(rename = "Variable")]
    variable: String,
    #[serde(rename = "Value")]
    value: Option<String>,
}

impl NhtsaResponse {
    fn value(&self, variable: &str) -> Option<String> {
        self.results
            .iter()
            .find(|r| r.variable == variable)
            .and_then(|r| r.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn decoded(&self) -> Option<DecodedVin> {
        let year = self.value("Model Year")?.parse::<i32>().ok()?;
        let make = self.value("Make")?;
        let model = self.value("Model")?;

        Some(DecodedVin {
            year,
            make,
            model,
            trim: self.value("Trim"),
        })
    }
}

/// Client for the NHTSA vPIC `decodevin` endpoint
pub struct NhtsaVinDecoder {
    base_url: String,
    client: reqwest::Client,
}

impl NhtsaVinDecoder {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl VinDecoder for NhtsaVinDecoder {
    async fn decode(&self, vin: &str) -> Result<Option<DecodedVin>, AppError> {
        let url = format!(
            "{}/api/vehicles/decodevin/{}?format=json",
            self.base_url,
            urlencoding::encode(vin)
        );
        log::info!("🚗 Decoding VIN {}", vin);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to decode VIN: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ NHTSA responded with status {}", status);
            return Err(AppError::ExternalApi("Failed to decode VIN".to_string()));
        }

        let body: NhtsaResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse NHTSA response: {}", e)))?;

        let decoded = body.decoded();
        match &decoded {
            Some(d) => log::info!("✅ VIN {} -> {} {} {}", vin, d.year, d.make, d.model),
            None => log::warn!("⚠️ NHTSA could not identify VIN {}", vin),
        }
        Ok(decoded)
    }
}
