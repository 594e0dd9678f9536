//! Data models
//!
//! Structs that map onto the PostgreSQL schema in `migrations/`.

pub mod sale_event;
pub mod vehicle;

pub use sale_event::{NewSaleEvent, SaleEvent, SaleEventStatus};
pub use vehicle::{LifecycleViolation, Vehicle, VehicleFields, VehicleStatus, VehicleWithEvent};
