//! Shared application state
//!
//! The state handed to every axum handler: configuration, repositories and
//! external-API clients, all behind trait objects.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    PgSaleEventRepository, PgVehicleRepository, SaleEventRepository, VehicleRepository,
};
use crate::services::{
    AnthropicDisclosureAnalyzer, CloudinaryVideoStorage, DisclosureAnalyzer, NhtsaVinDecoder,
    VideoStorage, VinDecoder,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub sale_events: Arc<dyn SaleEventRepository>,
    pub vin_decoder: Arc<dyn VinDecoder>,
    /// `None` when Cloudinary is not configured
    pub video_storage: Option<Arc<dyn VideoStorage>>,
    /// `None` when no AI key is configured
    pub disclosure_analyzer: Option<Arc<dyn DisclosureAnalyzer>>,
}

impl AppState {
    /// Wire PostgreSQL repositories and HTTP clients from `config`
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("DealMachine/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let vin_decoder: Arc<dyn VinDecoder> = Arc::new(NhtsaVinDecoder::new(
            config.nhtsa_base_url.clone(),
            http_client.clone(),
        ));

        let video_storage: Option<Arc<dyn VideoStorage>> =
            match (&config.cloudinary_cloud_name, &config.cloudinary_upload_preset) {
                (Some(cloud_name), Some(preset)) => Some(Arc::new(CloudinaryVideoStorage::new(
                    config.cloudinary_api_url.clone(),
                    cloud_name.clone(),
                    preset.clone(),
                    config.cloudinary_folder.clone(),
                    http_client.clone(),
                ))),
                _ => {
                    warn!("⚠️ CLOUDINARY_CLOUD_NAME/CLOUDINARY_UPLOAD_PRESET not set, video uploads disabled");
                    None
                }
            };

        let disclosure_analyzer: Option<Arc<dyn DisclosureAnalyzer>> = match &config.anthropic_api_key {
            Some(key) => Some(Arc::new(AnthropicDisclosureAnalyzer::new(
                config.anthropic_base_url.clone(),
                key.clone(),
                config.anthropic_model.clone(),
                http_client,
            ))),
            None => {
                warn!("⚠️ ANTHROPIC_API_KEY not set, AI disclosures disabled");
                None
            }
        };

        Ok(Self {
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            sale_events: Arc::new(PgSaleEventRepository::new(pool)),
            config,
            vin_decoder,
            video_storage,
            disclosure_analyzer,
        })
    }
}
