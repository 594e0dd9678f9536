//! Vehicle model
//!
//! The Vehicle struct, its lifecycle status and the merged-row checks run
//! before any write. Maps to the `vehicles` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::sale_event::SaleEvent;

/// Vehicle status - maps to the ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "vehicle_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    #[default]
    Draft,
    Inventory,
    Active,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Draft => "DRAFT",
            VehicleStatus::Inventory => "INVENTORY",
            VehicleStatus::Active => "ACTIVE",
            VehicleStatus::Sold => "SOLD",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(VehicleStatus::Draft),
            "INVENTORY" => Ok(VehicleStatus::Inventory),
            "ACTIVE" => Ok(VehicleStatus::Active),
            "SOLD" => Ok(VehicleStatus::Sold),
            other => Err(format!("Unknown vehicle status '{}'", other)),
        }
    }
}

/// Vehicle - maps to the vehicles table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub status: VehicleStatus,
    pub price: Option<Decimal>,
    pub final_sale_price: Option<Decimal>,
    pub ai_disclosures: Option<String>,
    pub video_url: Option<String>,
    pub mileage: Option<i32>,
    pub sale_event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vehicle together with the sale event it is attached to
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleWithEvent {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub sale_event: Option<SaleEvent>,
}

/// Writable vehicle columns.
///
/// Used both for inserts and as the fully merged row of an update, so the
/// lifecycle checks in [`VehicleFields::check_lifecycle`] see exactly what
/// will be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFields {
    pub vin: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub status: VehicleStatus,
    pub price: Option<Decimal>,
    pub final_sale_price: Option<Decimal>,
    pub ai_disclosures: Option<String>,
    pub video_url: Option<String>,
    pub mileage: Option<i32>,
    pub sale_event_id: Option<Uuid>,
}

/// Reasons a merged row cannot be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleViolation {
    SoldWithoutPrice,
}

impl fmt::Display for LifecycleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleViolation::SoldWithoutPrice => {
                f.write_str("A final sale price is required to mark a vehicle as sold")
            }
        }
    }
}

impl VehicleFields {
    /// Enforce the sold/final-price coupling.
    ///
    /// A non-SOLD row never carries a final sale price, so it is dropped here.
    pub fn check_lifecycle(mut self) -> Result<Self, LifecycleViolation> {
        if self.status == VehicleStatus::Sold {
            if self.final_sale_price.is_none() {
                return Err(LifecycleViolation::SoldWithoutPrice);
            }
        } else {
            self.final_sale_price = None;
        }
        Ok(self)
    }
}

impl From<Vehicle> for VehicleFields {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            vin: vehicle.vin,
            year: vehicle.year,
            make: vehicle.make,
            model: vehicle.model,
            trim: vehicle.trim,
            status: vehicle.status,
            price: vehicle.price,
            final_sale_price: vehicle.final_sale_price,
            ai_disclosures: vehicle.ai_disclosures,
            video_url: vehicle.video_url,
            mileage: vehicle.mileage,
            sale_event_id: vehicle.sale_event_id,
        }
    }
}
