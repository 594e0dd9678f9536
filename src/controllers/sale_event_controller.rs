use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::dto::sale_event_dto::{CreateSaleEventRequest, SaleEventDetailResponse, UpdateSaleEventRequest};
use crate::dto::ApiResponse;
use crate::models::sale_event::{NewSaleEvent, SaleEvent};
use crate::repositories::{SaleEventRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::patch;
use crate::utils::validation::{non_blank, parse_datetime};

pub struct SaleEventController {
    sale_events: Arc<dyn SaleEventRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    parse_datetime(value).map_err(|_| AppError::BadRequest(format!("Invalid {} '{}'", field, value)))
}

fn check_window(event: &NewSaleEvent) -> Result<(), AppError> {
    if event.end_date < event.start_date {
        return Err(bad_request_error("End date must not be before start date"));
    }
    Ok(())
}

impl SaleEventController {
    pub fn new(state: &AppState) -> Self {
        Self {
            sale_events: state.sale_events.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<SaleEvent>, AppError> {
        self.sale_events.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<SaleEventDetailResponse, AppError> {
        let event = self
            .sale_events
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Sale event", &id.to_string()))?;
        let vehicles = self.vehicles.list_by_sale_event(id).await?;

        Ok(SaleEventDetailResponse { event, vehicles })
    }

    pub async fn create(&self, request: CreateSaleEventRequest) -> Result<ApiResponse<SaleEvent>, AppError> {
        request.validate()?;

        let (Some(title), Some(start_date), Some(end_date)) = (
            non_blank(request.title),
            non_blank(request.start_date),
            non_blank(request.end_date),
        ) else {
            return Err(bad_request_error("Title, start date, and end date are required"));
        };

        let event = NewSaleEvent {
            title,
            start_date: parse_date("start date", &start_date)?,
            end_date: parse_date("end date", &end_date)?,
            external_link: non_blank(request.external_link),
            status: request.status.unwrap_or_default(),
        };
        check_window(&event)?;

        let created = self.sale_events.create(event).await?;
        tracing::info!("📅 Sale event created: {} ({})", created.title, created.id);

        Ok(ApiResponse::success_with_message(created, "Sale event created successfully"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateSaleEventRequest) -> Result<ApiResponse<SaleEvent>, AppError> {
        request.validate()?;

        let current = self
            .sale_events
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Sale event", &id.to_string()))?;

        let title = match request.title {
            Some(title) => non_blank(Some(title)).ok_or_else(|| bad_request_error("Title cannot be empty"))?,
            None => current.title,
        };
        let start_date = match request.start_date {
            Some(raw) => parse_date("start date", &raw)?,
            None => current.start_date,
        };
        let end_date = match request.end_date {
            Some(raw) => parse_date("end date", &raw)?,
            None => current.end_date,
        };

        let event = NewSaleEvent {
            title,
            start_date,
            end_date,
            external_link: patch::apply(request.external_link.map(non_blank), current.external_link),
            status: request.status.unwrap_or(current.status),
        };
        check_window(&event)?;

        let updated = self.sale_events.update(id, event).await?;
        tracing::info!("📅 Sale event updated: {} -> {}", updated.id, updated.status);

        Ok(ApiResponse::success_with_message(updated, "Sale event updated successfully"))
    }
}
