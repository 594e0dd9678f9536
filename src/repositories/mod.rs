//! Repositories
//!
//! Storage access for vehicles and sale events. Each repository is a trait
//! with a PostgreSQL implementation; handlers only see the trait objects.

pub mod sale_event_repository;
pub mod vehicle_repository;

pub use sale_event_repository::{PgSaleEventRepository, SaleEventRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
