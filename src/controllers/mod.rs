//! Controllers
//!
//! Request-level operations: validation, lifecycle rules and joins between
//! vehicles and sale events. Routes hand them already-extracted input.

pub mod listing_controller;
pub mod media_controller;
pub mod sale_event_controller;
pub mod vehicle_controller;

use std::collections::HashMap;

use crate::models::vehicle::{Vehicle, VehicleWithEvent};
use crate::repositories::SaleEventRepository;
use crate::utils::errors::AppError;

/// Pair each vehicle with its sale event, preserving order
pub async fn attach_sale_events(
    sale_events: &dyn SaleEventRepository,
    vehicles: Vec<Vehicle>,
) -> Result<Vec<VehicleWithEvent>, AppError> {
    let mut ids: Vec<_> = vehicles.iter().filter_map(|v| v.sale_event_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let events: HashMap<_, _> = sale_events
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|event| (event.id, event))
        .collect();

    Ok(vehicles
        .into_iter()
        .map(|vehicle| {
            let sale_event = vehicle.sale_event_id.and_then(|id| events.get(&id).cloned());
            VehicleWithEvent { vehicle, sale_event }
        })
        .collect())
}
