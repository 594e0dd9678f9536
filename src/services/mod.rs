//! Services module
//!
//! Clients for the external APIs the catalog leans on: VIN decoding,
//! video hosting and AI condition disclosures. Each sits behind a trait
//! so handlers can run against fakes.

pub mod disclosure_service;
pub mod video_upload_service;
pub mod vin_decode_service;

pub use disclosure_service::{AnthropicDisclosureAnalyzer, DisclosureAnalyzer};
pub use video_upload_service::{CloudinaryVideoStorage, VideoStorage};
pub use vin_decode_service::{NhtsaVinDecoder, VinDecoder};
