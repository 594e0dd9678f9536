//! Environment configuration
//!
//! Reads process environment (after `.env` is loaded) into a typed config.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_NHTSA_BASE_URL: &str = "https://vpic.nhtsa.dot.gov";
pub const DEFAULT_CLOUDINARY_API_URL: &str = "https://api.cloudinary.com";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    /// Bearer token for admin routes; `None` leaves them open
    pub admin_api_key: Option<String>,
    pub http_timeout_secs: u64,
    pub max_upload_bytes: usize,
    // VIN decode
    pub nhtsa_base_url: String,
    // Video hosting
    pub cloudinary_api_url: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,
    pub cloudinary_folder: String,
    // Condition disclosures
    pub anthropic_base_url: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            cors_origins: Vec::new(),
            admin_api_key: None,
            http_timeout_secs: 30,
            max_upload_bytes: 100 * 1024 * 1024,
            nhtsa_base_url: DEFAULT_NHTSA_BASE_URL.to_string(),
            cloudinary_api_url: DEFAULT_CLOUDINARY_API_URL.to_string(),
            cloudinary_cloud_name: None,
            cloudinary_upload_preset: None,
            cloudinary_folder: "deal-machine".to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            anthropic_api_key: None,
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Build the config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            admin_api_key: optional_var("ADMIN_API_KEY"),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS")?.unwrap_or(defaults.http_timeout_secs),
            max_upload_bytes: upload_limit_bytes(parse_var("MAX_UPLOAD_MB")?)?
                .unwrap_or(defaults.max_upload_bytes),
            nhtsa_base_url: env::var("NHTSA_BASE_URL").unwrap_or(defaults.nhtsa_base_url),
            cloudinary_api_url: env::var("CLOUDINARY_API_URL").unwrap_or(defaults.cloudinary_api_url),
            cloudinary_cloud_name: optional_var("CLOUDINARY_CLOUD_NAME"),
            cloudinary_upload_preset: optional_var("CLOUDINARY_UPLOAD_PRESET"),
            cloudinary_folder: env::var("CLOUDINARY_FOLDER").unwrap_or(defaults.cloudinary_folder),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            anthropic_api_key: optional_var("ANTHROPIC_API_KEY"),
            anthropic_model: env::var("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
        })
    }

    /// Whether we run in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Whether we run in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Address the server binds to
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Non-empty variable or `None`
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Convert a megabyte limit to bytes, rejecting values that overflow `usize`
fn upload_limit_bytes(megabytes: Option<usize>) -> Result<Option<usize>> {
    megabytes
        .map(|mb| {
            mb.checked_mul(1024 * 1024)
                .context("MAX_UPLOAD_MB must be a valid number")
        })
        .transpose()
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} must be a valid number", name)),
        None => Ok(None),
    }
}
