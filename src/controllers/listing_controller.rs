use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::controllers::attach_sale_events;
use crate::dto::listing_dto::{ResultsResponse, ResultsSummary};
use crate::models::vehicle::{VehicleStatus, VehicleWithEvent};
use crate::repositories::{SaleEventRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Public storefront: live listings, vehicle detail and past results
pub struct ListingController {
    vehicles: Arc<dyn VehicleRepository>,
    sale_events: Arc<dyn SaleEventRepository>,
}

impl ListingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            sale_events: state.sale_events.clone(),
        }
    }

    /// ACTIVE vehicles attached to a sale event that is live at `now`
    pub async fn listings(&self, now: DateTime<Utc>) -> Result<Vec<VehicleWithEvent>, AppError> {
        let active = self.vehicles.list(Some(VehicleStatus::Active)).await?;
        let listed = attach_sale_events(self.sale_events.as_ref(), active).await?;

        Ok(listed
            .into_iter()
            .filter(|entry| is_listable(entry, now))
            .collect())
    }

    /// Any non-draft vehicle, so results can link to sold units
    pub async fn detail(&self, id: Uuid) -> Result<VehicleWithEvent, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .filter(|v| v.status != VehicleStatus::Draft)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        attach_sale_events(self.sale_events.as_ref(), vec![vehicle])
            .await?
            .pop()
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn results(&self) -> Result<ResultsResponse, AppError> {
        let sold = self.vehicles.list_sold().await?;
        let vehicles = attach_sale_events(self.sale_events.as_ref(), sold).await?;

        Ok(ResultsResponse {
            summary: summarize(&vehicles),
            vehicles,
        })
    }
}

fn is_listable(entry: &VehicleWithEvent, now: DateTime<Utc>) -> bool {
    entry.vehicle.status == VehicleStatus::Active
        && entry.sale_event.as_ref().is_some_and(|event| event.is_live_at(now))
}

/// Totals for the results page
pub fn summarize(vehicles: &[VehicleWithEvent]) -> ResultsSummary {
    let total_sales_volume: Decimal = vehicles
        .iter()
        .filter_map(|entry| entry.vehicle.final_sale_price)
        .sum();

    let average_sale_price = if vehicles.is_empty() {
        Decimal::ZERO
    } else {
        (total_sales_volume / Decimal::from(vehicles.len()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };

    let event_count = vehicles
        .iter()
        .filter_map(|entry| entry.vehicle.sale_event_id)
        .collect::<HashSet<_>>()
        .len();

    ResultsSummary {
        total_sold: vehicles.len(),
        total_sales_volume,
        average_sale_price,
        event_count,
    }
}
