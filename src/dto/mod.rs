//! Request and response bodies

pub mod listing_dto;
pub mod media_dto;
pub mod response_dto;
pub mod sale_event_dto;
pub mod vehicle_dto;

pub use response_dto::ApiResponse;
