use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::attach_sale_events;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, RelistVehicleRequest, SellVehicleRequest, UpdateVehicleRequest, VehicleFilters,
};
use crate::dto::ApiResponse;
use crate::models::vehicle::{Vehicle, VehicleFields, VehicleStatus, VehicleWithEvent};
use crate::repositories::{SaleEventRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::patch;
use crate::utils::validation::{non_blank, normalize_vin, validate_non_negative, validate_positive, validate_vin};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    sale_events: Arc<dyn SaleEventRepository>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            sale_events: state.sale_events.clone(),
        }
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.vehicles.list(filters.status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<VehicleWithEvent, AppError> {
        let vehicle = self.find(id).await?;
        self.with_event(vehicle).await
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let vin = request.vin.as_deref().map(normalize_vin).filter(|v| !v.is_empty());
        let (Some(vin), Some(year), Some(make), Some(model)) =
            (vin, request.year, non_blank(request.make), non_blank(request.model))
        else {
            return Err(bad_request_error("VIN, year, make, and model are required"));
        };

        validate_vin(&vin)
            .map_err(|_| bad_request_error("VIN must be 17 characters (A-Z, 0-9, excluding I, O, Q)"))?;

        if self.vehicles.vin_exists(&vin).await? {
            return Err(AppError::Conflict("A vehicle with this VIN already exists".to_string()));
        }

        if let Some(sale_event_id) = request.sale_event_id {
            self.ensure_sale_event(sale_event_id).await?;
        }

        let status = request.status.unwrap_or_default();
        if let Some(final_sale_price) = &request.final_sale_price {
            validate_positive(final_sale_price)
                .map_err(|_| bad_request_error("Final sale price must be greater than zero"))?;
        }
        reject_stray_final_price(status, request.final_sale_price)?;

        let fields = VehicleFields {
            vin,
            year,
            make,
            model,
            trim: non_blank(request.trim),
            status,
            price: request.price,
            final_sale_price: request.final_sale_price,
            ai_disclosures: non_blank(request.ai_disclosures),
            video_url: non_blank(request.video_url),
            mileage: request.mileage,
            sale_event_id: request.sale_event_id,
        }
        .check_lifecycle()
        .map_err(|v| AppError::BadRequest(v.to_string()))?;

        let vehicle = self.vehicles.create(fields).await?;
        tracing::info!("🚗 Vehicle created: {} {} {} ({})", vehicle.year, vehicle.make, vehicle.model, vehicle.vin);

        Ok(ApiResponse::success_with_message(vehicle, "Vehicle created successfully"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<ApiResponse<VehicleWithEvent>, AppError> {
        request.validate()?;

        let current = self.find(id).await?;
        let mut fields = VehicleFields::from(current);

        if let Some(year) = request.year {
            fields.year = year;
        }
        if let Some(make) = request.make {
            fields.make = non_blank(Some(make)).ok_or_else(|| bad_request_error("Make cannot be empty"))?;
        }
        if let Some(model) = request.model {
            fields.model = non_blank(Some(model)).ok_or_else(|| bad_request_error("Model cannot be empty"))?;
        }
        if let Some(status) = request.status {
            fields.status = status;
        }

        if let Some(Some(price)) = &request.price {
            validate_non_negative(price).map_err(|_| bad_request_error("Price cannot be negative"))?;
        }
        if let Some(Some(mileage)) = &request.mileage {
            validate_non_negative(mileage).map_err(|_| bad_request_error("Mileage cannot be negative"))?;
        }
        if let Some(Some(final_sale_price)) = &request.final_sale_price {
            validate_positive(final_sale_price)
                .map_err(|_| bad_request_error("Final sale price must be greater than zero"))?;
            reject_stray_final_price(fields.status, Some(*final_sale_price))?;
        }
        if let Some(Some(sale_event_id)) = request.sale_event_id {
            self.ensure_sale_event(sale_event_id).await?;
        }

        fields.trim = patch::apply(request.trim.map(non_blank), fields.trim);
        fields.price = patch::apply(request.price, fields.price);
        fields.final_sale_price = patch::apply(request.final_sale_price, fields.final_sale_price);
        fields.ai_disclosures = patch::apply(request.ai_disclosures.map(non_blank), fields.ai_disclosures);
        fields.video_url = patch::apply(request.video_url.map(non_blank), fields.video_url);
        fields.mileage = patch::apply(request.mileage, fields.mileage);
        fields.sale_event_id = patch::apply(request.sale_event_id, fields.sale_event_id);

        let fields = fields
            .check_lifecycle()
            .map_err(|v| AppError::BadRequest(v.to_string()))?;

        let vehicle = self.vehicles.update(id, fields).await?;
        tracing::info!("✏️ Vehicle updated: {} ({})", vehicle.id, vehicle.status);

        let response = self.with_event(vehicle).await?;
        Ok(ApiResponse::success_with_message(response, "Vehicle updated successfully"))
    }

    /// Mark a vehicle SOLD at `final_sale_price`
    pub async fn sell(&self, id: Uuid, request: SellVehicleRequest) -> Result<ApiResponse<VehicleWithEvent>, AppError> {
        let final_sale_price = request
            .final_sale_price
            .ok_or_else(|| bad_request_error("A final sale price is required to mark a vehicle as sold"))?;
        validate_positive(&final_sale_price)
            .map_err(|_| bad_request_error("Final sale price must be greater than zero"))?;

        let mut fields = VehicleFields::from(self.find(id).await?);
        fields.status = VehicleStatus::Sold;
        fields.final_sale_price = Some(final_sale_price);

        let fields = fields
            .check_lifecycle()
            .map_err(|v| AppError::BadRequest(v.to_string()))?;

        let vehicle = self.vehicles.update(id, fields).await?;
        tracing::info!("💰 Vehicle {} sold for {}", vehicle.vin, final_sale_price);

        let response = self.with_event(vehicle).await?;
        Ok(ApiResponse::success_with_message(response, "Vehicle marked as sold"))
    }

    /// Put a SOLD vehicle back on the market.
    ///
    /// Without a sale event it returns to INVENTORY; with one it goes
    /// straight to ACTIVE on that event.
    pub async fn relist(&self, id: Uuid, request: RelistVehicleRequest) -> Result<ApiResponse<VehicleWithEvent>, AppError> {
        let current = self.find(id).await?;
        if current.status != VehicleStatus::Sold {
            return Err(AppError::Conflict(format!(
                "Only sold vehicles can be relisted (vehicle is {})",
                current.status
            )));
        }

        let mut fields = VehicleFields::from(current);
        match request.sale_event_id {
            Some(sale_event_id) => {
                self.ensure_sale_event(sale_event_id).await?;
                fields.status = VehicleStatus::Active;
                fields.sale_event_id = Some(sale_event_id);
            }
            None => {
                fields.status = VehicleStatus::Inventory;
                fields.sale_event_id = None;
            }
        }

        let fields = fields
            .check_lifecycle()
            .map_err(|v| AppError::BadRequest(v.to_string()))?;

        let vehicle = self.vehicles.update(id, fields).await?;
        tracing::info!("🔁 Vehicle {} relisted as {}", vehicle.vin, vehicle.status);

        let response = self.with_event(vehicle).await?;
        Ok(ApiResponse::success_with_message(response, "Vehicle relisted"))
    }

    async fn find(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn ensure_sale_event(&self, id: Uuid) -> Result<(), AppError> {
        if !self.sale_events.exists(id).await? {
            return Err(AppError::BadRequest(format!("Sale event '{}' does not exist", id)));
        }
        Ok(())
    }

    async fn with_event(&self, vehicle: Vehicle) -> Result<VehicleWithEvent, AppError> {
        attach_sale_events(self.sale_events.as_ref(), vec![vehicle])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Vehicle lost while attaching sale event".to_string()))
    }
}

/// A final sale price may only be written together with SOLD
fn reject_stray_final_price(status: VehicleStatus, final_sale_price: Option<Decimal>) -> Result<(), AppError> {
    if final_sale_price.is_some() && status != VehicleStatus::Sold {
        return Err(bad_request_error("A final sale price can only be set on a sold vehicle"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_price_only_with_sold() {
        let price = Some(Decimal::new(12_000, 0));
        assert!(reject_stray_final_price(VehicleStatus::Sold, price).is_ok());
        assert!(reject_stray_final_price(VehicleStatus::Active, price).is_err());
        assert!(reject_stray_final_price(VehicleStatus::Draft, None).is_ok());
    }
}
