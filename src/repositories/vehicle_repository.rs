use crate::models::vehicle::{Vehicle, VehicleFields, VehicleStatus};
use crate::utils::errors::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, fields: VehicleFields) -> Result<Vehicle, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError>;

    async fn vin_exists(&self, vin: &str) -> Result<bool, AppError>;

    /// Vehicles newest first, optionally restricted to one status
    async fn list(&self, status: Option<VehicleStatus>) -> Result<Vec<Vehicle>, AppError>;

    async fn list_by_sale_event(&self, sale_event_id: Uuid) -> Result<Vec<Vehicle>, AppError>;

    /// SOLD vehicles, most recently updated first
    async fn list_sold(&self) -> Result<Vec<Vehicle>, AppError>;

    /// Overwrite every writable column with `fields`
    async fn update(&self, id: Uuid, fields: VehicleFields) -> Result<Vehicle, AppError>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, fields: VehicleFields) -> Result<Vehicle, AppError> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, vin, year, make, model, trim, status, price, final_sale_price,
                ai_disclosures, video_url, mileage, sale_event_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(fields.vin)
        .bind(fields.year)
        .bind(fields.make)
        .bind(fields.model)
        .bind(fields.trim)
        .bind(fields.status)
        .bind(fields.price)
        .bind(fields.final_sale_price)
        .bind(fields.ai_disclosures)
        .bind(fields.video_url)
        .bind(fields.mileage)
        .bind(fields.sale_event_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "vehicle"))?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn vin_exists(&self, vin: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn list(&self, status: Option<VehicleStatus>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn list_by_sale_event(&self, sale_event_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE sale_event_id = $1 ORDER BY created_at DESC"
        )
        .bind(sale_event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn list_sold(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE status = 'SOLD' ORDER BY updated_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn update(&self, id: Uuid, fields: VehicleFields) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vin = $2, year = $3, make = $4, model = $5, trim = $6, status = $7,
                price = $8, final_sale_price = $9, ai_disclosures = $10, video_url = $11,
                mileage = $12, sale_event_id = $13, updated_at = $14
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(fields.vin)
        .bind(fields.year)
        .bind(fields.make)
        .bind(fields.model)
        .bind(fields.trim)
        .bind(fields.status)
        .bind(fields.price)
        .bind(fields.final_sale_price)
        .bind(fields.ai_disclosures)
        .bind(fields.video_url)
        .bind(fields.mileage)
        .bind(fields.sale_event_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "vehicle"))?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle)
    }
}
