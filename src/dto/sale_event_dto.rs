use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::sale_event::{SaleEvent, SaleEventStatus};
use crate::models::vehicle::Vehicle;
use crate::utils::patch::double_option;
use crate::utils::validation::lenient_enum;

// Request to create a sale event. Dates are strings so both RFC 3339 and
// `datetime-local` form values are accepted.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateSaleEventRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub external_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<SaleEventStatus>,
}

// Request to update a sale event
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSaleEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub external_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<SaleEventStatus>,
}

// Sale event with the vehicles attached to it
#[derive(Debug, Serialize)]
pub struct SaleEventDetailResponse {
    #[serde(flatten)]
    pub event: SaleEvent,
    pub vehicles: Vec<Vehicle>,
}
