#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use deal_machine::config::EnvironmentConfig;
use deal_machine::dto::media_dto::{DecodedVin, UploadResponse, VehicleInfo};
use deal_machine::models::{NewSaleEvent, SaleEvent, SaleEventStatus, Vehicle, VehicleFields, VehicleStatus};
use deal_machine::repositories::{SaleEventRepository, VehicleRepository};
use deal_machine::services::{DisclosureAnalyzer, VideoStorage, VinDecoder};
use deal_machine::utils::errors::AppError;
use deal_machine::{create_router, AppState};

pub const ADMIN_KEY: &str = "test-admin-key";

#[derive(Default)]
pub struct InMemoryVehicles {
    rows: Mutex<Vec<Vehicle>>,
}

#[async_trait]
impl VehicleRepository for InMemoryVehicles {
    async fn create(&self, fields: VehicleFields) -> Result<Vehicle, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|v| v.vin == fields.vin) {
            return Err(AppError::Conflict("A vehicle with this VIN already exists".to_string()));
        }

        // Strictly increasing timestamps keep "newest first" deterministic
        let now = Utc::now() + Duration::milliseconds(rows.len() as i64);
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            vin: fields.vin,
            year: fields.year,
            make: fields.make,
            model: fields.model,
            trim: fields.trim,
            status: fields.status,
            price: fields.price,
            final_sale_price: fields.final_sale_price,
            ai_disclosures: fields.ai_disclosures,
            video_url: fields.video_url,
            mileage: fields.mileage,
            sale_event_id: fields.sale_event_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|v| v.id == id).cloned())
    }

    async fn vin_exists(&self, vin: &str) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().iter().any(|v| v.vin == vin))
    }

    async fn list(&self, status: Option<VehicleStatus>) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| status.map_or(true, |s| v.status == s))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn list_by_sale_event(&self, sale_event_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        Ok(self
            .list(None)
            .await?
            .into_iter()
            .filter(|v| v.sale_event_id == Some(sale_event_id))
            .collect())
    }

    async fn list_sold(&self) -> Result<Vec<Vehicle>, AppError> {
        let mut sold = self.list(Some(VehicleStatus::Sold)).await?;
        sold.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sold)
    }

    async fn update(&self, id: Uuid, fields: VehicleFields) -> Result<Vehicle, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let vehicle = rows
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        vehicle.vin = fields.vin;
        vehicle.year = fields.year;
        vehicle.make = fields.make;
        vehicle.model = fields.model;
        vehicle.trim = fields.trim;
        vehicle.status = fields.status;
        vehicle.price = fields.price;
        vehicle.final_sale_price = fields.final_sale_price;
        vehicle.ai_disclosures = fields.ai_disclosures;
        vehicle.video_url = fields.video_url;
        vehicle.mileage = fields.mileage;
        vehicle.sale_event_id = fields.sale_event_id;
        vehicle.updated_at = Utc::now();
        Ok(vehicle.clone())
    }
}

#[derive(Default)]
pub struct InMemorySaleEvents {
    rows: Mutex<HashMap<Uuid, SaleEvent>>,
}

impl InMemorySaleEvents {
    /// Insert an event directly, bypassing request validation
    pub fn seed(&self, title: &str, status: SaleEventStatus, start_offset: Duration, end_offset: Duration) -> SaleEvent {
        let now = Utc::now();
        let event = SaleEvent {
            id: Uuid::new_v4(),
            title: title.to_string(),
            start_date: now + start_offset,
            end_date: now + end_offset,
            external_link: None,
            status,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(event.id, event.clone());
        event
    }
}

#[async_trait]
impl SaleEventRepository for InMemorySaleEvents {
    async fn create(&self, event: NewSaleEvent) -> Result<SaleEvent, AppError> {
        let now = Utc::now();
        let created = SaleEvent {
            id: Uuid::new_v4(),
            title: event.title,
            start_date: event.start_date,
            end_date: event.end_date,
            external_link: event.external_link,
            status: event.status,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SaleEvent>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<SaleEvent>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<SaleEvent>, AppError> {
        let mut events: Vec<_> = self.rows.lock().unwrap().values().cloned().collect();
        events.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(events)
    }

    async fn update(&self, id: Uuid, event: NewSaleEvent) -> Result<SaleEvent, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let existing = rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Sale event not found".to_string()))?;

        existing.title = event.title;
        existing.start_date = event.start_date;
        existing.end_date = event.end_date;
        existing.external_link = event.external_link;
        existing.status = event.status;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }
}

/// Decodes only the VINs it was given
#[derive(Default)]
pub struct FakeVinDecoder {
    pub known: HashMap<String, DecodedVin>,
    pub fail: bool,
}

#[async_trait]
impl VinDecoder for FakeVinDecoder {
    async fn decode(&self, vin: &str) -> Result<Option<DecodedVin>, AppError> {
        if self.fail {
            return Err(AppError::ExternalApi("Failed to decode VIN".to_string()));
        }
        Ok(self.known.get(vin).cloned())
    }
}

/// Records uploads and hands back a Cloudinary-shaped URL
#[derive(Default)]
pub struct FakeVideoStorage {
    pub uploads: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl VideoStorage for FakeVideoStorage {
    async fn upload_video(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse, AppError> {
        self.uploads.lock().unwrap().push((file_name.to_string(), bytes.len()));
        Ok(UploadResponse {
            url: format!("https://res.cloudinary.com/demo/video/upload/v1/deal-machine/{}", file_name),
            public_id: format!("deal-machine/{}", file_name),
        })
    }
}

/// Echoes the vehicle description it was asked about
#[derive(Default)]
pub struct FakeDisclosureAnalyzer;

#[async_trait]
impl DisclosureAnalyzer for FakeDisclosureAnalyzer {
    async fn analyze(&self, _video_url: &str, vehicle: Option<&VehicleInfo>) -> Result<String, AppError> {
        let desc = vehicle.map(VehicleInfo::describe).unwrap_or_default();
        Ok(format!("Overall Assessment: Good. {}", desc).trim().to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub vehicles: Arc<InMemoryVehicles>,
    pub sale_events: Arc<InMemorySaleEvents>,
    pub video_storage: Arc<FakeVideoStorage>,
}

pub struct TestAppBuilder {
    config: EnvironmentConfig,
    vin_decoder: FakeVinDecoder,
    with_video_storage: bool,
    with_analyzer: bool,
}

impl TestAppBuilder {
    pub fn admin_key(mut self, key: &str) -> Self {
        self.config.admin_api_key = Some(key.to_string());
        self
    }

    pub fn vin_decoder(mut self, decoder: FakeVinDecoder) -> Self {
        self.vin_decoder = decoder;
        self
    }

    pub fn without_analyzer(mut self) -> Self {
        self.with_analyzer = false;
        self
    }

    pub fn without_video_storage(mut self) -> Self {
        self.with_video_storage = false;
        self
    }

    pub fn build(self) -> TestApp {
        let vehicles = Arc::new(InMemoryVehicles::default());
        let sale_events = Arc::new(InMemorySaleEvents::default());
        let video_storage = Arc::new(FakeVideoStorage::default());

        let state = AppState {
            config: self.config,
            vehicles: vehicles.clone(),
            sale_events: sale_events.clone(),
            vin_decoder: Arc::new(self.vin_decoder),
            video_storage: if self.with_video_storage {
                Some(video_storage.clone() as Arc<dyn VideoStorage>)
            } else {
                None
            },
            disclosure_analyzer: if self.with_analyzer {
                Some(Arc::new(FakeDisclosureAnalyzer) as Arc<dyn DisclosureAnalyzer>)
            } else {
                None
            },
        };

        TestApp {
            router: create_router(state),
            vehicles,
            sale_events,
            video_storage,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            config: EnvironmentConfig::default(),
            vin_decoder: FakeVinDecoder::default(),
            with_video_storage: true,
            with_analyzer: true,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json("PATCH", uri, body).await
    }

    /// Create a vehicle through the API and return its id
    pub async fn create_vehicle(&self, body: Value) -> Uuid {
        let (status, response) = self.post("/api/vehicles", body).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", response);
        response["data"]["id"].as_str().unwrap().parse().unwrap()
    }
}

pub fn vehicle_body(vin: &str) -> Value {
    serde_json::json!({
        "vin": vin,
        "year": 2019,
        "make": "Honda",
        "model": "Accord",
        "trim": "EX-L",
        "price": 18500.00,
        "mileage": 42000
    })
}

/// Read a money field whether it was serialized as a string or a number
pub fn decimal(value: &Value) -> rust_decimal::Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("not a decimal: {}", other),
    }
}
