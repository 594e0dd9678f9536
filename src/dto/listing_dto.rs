use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::vehicle::VehicleWithEvent;

// Aggregates shown above the results table
#[derive(Debug, Serialize, PartialEq)]
pub struct ResultsSummary {
    pub total_sold: usize,
    pub total_sales_volume: Decimal,
    pub average_sale_price: Decimal,
    pub event_count: usize,
}

// Past sale results
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub summary: ResultsSummary,
    pub vehicles: Vec<VehicleWithEvent>,
}
