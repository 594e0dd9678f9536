use crate::models::sale_event::{NewSaleEvent, SaleEvent};
use crate::utils::errors::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait SaleEventRepository: Send + Sync {
    async fn create(&self, event: NewSaleEvent) -> Result<SaleEvent, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SaleEvent>, AppError>;

    /// Events referenced by `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SaleEvent>, AppError>;

    /// All events, newest start date first
    async fn list(&self) -> Result<Vec<SaleEvent>, AppError>;

    async fn update(&self, id: Uuid, event: NewSaleEvent) -> Result<SaleEvent, AppError>;

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

pub struct PgSaleEventRepository {
    pool: PgPool,
}

impl PgSaleEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleEventRepository for PgSaleEventRepository {
    async fn create(&self, event: NewSaleEvent) -> Result<SaleEvent, AppError> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, SaleEvent>(
            r#"
            INSERT INTO sale_events (id, title, start_date, end_date, external_link, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(event.title)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.external_link)
        .bind(event.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SaleEvent>, AppError> {
        let event = sqlx::query_as::<_, SaleEvent>("SELECT * FROM sale_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SaleEvent>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = sqlx::query_as::<_, SaleEvent>("SELECT * FROM sale_events WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn list(&self) -> Result<Vec<SaleEvent>, AppError> {
        let events = sqlx::query_as::<_, SaleEvent>(
            "SELECT * FROM sale_events ORDER BY start_date DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn update(&self, id: Uuid, event: NewSaleEvent) -> Result<SaleEvent, AppError> {
        let updated = sqlx::query_as::<_, SaleEvent>(
            r#"
            UPDATE sale_events
            SET title = $2, start_date = $3, end_date = $4, external_link = $5, status = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(event.title)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.external_link)
        .bind(event.status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale event not found".to_string()))?;

        Ok(updated)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sale_events WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
