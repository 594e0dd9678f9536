use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::vehicle::VehicleStatus;
use crate::utils::patch::double_option;
use crate::utils::validation::{lenient_enum, validate_non_negative};

fn money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)
}

// Request to create a vehicle. Required fields are optional here so a
// missing one yields a readable 400 instead of a JSON rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub vin: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(max = 100))]
    pub make: Option<String>,

    #[validate(length(max = 100))]
    pub model: Option<String>,

    #[validate(length(max = 100))]
    pub trim: Option<String>,

    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<VehicleStatus>,

    #[validate(custom = "money")]
    pub price: Option<Decimal>,

    #[validate(custom = "money")]
    pub final_sale_price: Option<Decimal>,

    pub ai_disclosures: Option<String>,

    pub video_url: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    pub sale_event_id: Option<Uuid>,
}

// Request to update a vehicle. `Option<Option<_>>` fields distinguish
// "absent" from an explicit null that clears the column.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub trim: Option<Option<String>>,

    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<VehicleStatus>,

    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub final_sale_price: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub ai_disclosures: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub video_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub mileage: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    pub sale_event_id: Option<Option<Uuid>>,
}

// Request to mark a vehicle as sold
#[derive(Debug, Deserialize)]
pub struct SellVehicleRequest {
    pub final_sale_price: Option<Decimal>,
}

// Request to put a sold vehicle back on the market
#[derive(Debug, Default, Deserialize)]
pub struct RelistVehicleRequest {
    #[serde(default)]
    pub sale_event_id: Option<Uuid>,
}

// Query filters for the admin vehicle list
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<VehicleStatus>,
}
