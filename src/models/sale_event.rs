//! SaleEvent model
//!
//! A scheduled auction window that groups listed vehicles. Maps to the
//! `sale_events` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Sale event status - maps to the ENUM sale_event_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "sale_event_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleEventStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl SaleEventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleEventStatus::Upcoming => "UPCOMING",
            SaleEventStatus::Active => "ACTIVE",
            SaleEventStatus::Completed => "COMPLETED",
            SaleEventStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for SaleEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleEventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UPCOMING" => Ok(SaleEventStatus::Upcoming),
            "ACTIVE" => Ok(SaleEventStatus::Active),
            "COMPLETED" => Ok(SaleEventStatus::Completed),
            "CANCELLED" => Ok(SaleEventStatus::Cancelled),
            other => Err(format!("Unknown sale event status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SaleEvent {
    pub id: Uuid,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub external_link: Option<String>,
    pub status: SaleEventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SaleEvent {
    /// Whether vehicles attached to this event belong on the storefront.
    ///
    /// An ACTIVE or UPCOMING event always qualifies; any other status still
    /// qualifies while `now` falls inside the event window.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.status, SaleEventStatus::Active | SaleEventStatus::Upcoming)
            || (self.start_date <= now && now <= self.end_date)
    }
}

/// Columns needed to insert a sale event
#[derive(Debug, Clone)]
pub struct NewSaleEvent {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub external_link: Option<String>,
    pub status: SaleEventStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(status: SaleEventStatus, start_offset_h: i64, end_offset_h: i64, now: DateTime<Utc>) -> SaleEvent {
        SaleEvent {
            id: Uuid::new_v4(),
            title: "January Public Auction".to_string(),
            start_date: now + Duration::hours(start_offset_h),
            end_date: now + Duration::hours(end_offset_h),
            external_link: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_active_and_upcoming_are_always_live() {
        let now = Utc::now();
        assert!(event(SaleEventStatus::Active, -72, -48, now).is_live_at(now));
        assert!(event(SaleEventStatus::Upcoming, 48, 72, now).is_live_at(now));
    }

    #[test]
    fn test_other_statuses_live_only_inside_window() {
        let now = Utc::now();
        assert!(event(SaleEventStatus::Completed, -1, 1, now).is_live_at(now));
        assert!(!event(SaleEventStatus::Completed, -48, -24, now).is_live_at(now));
        assert!(!event(SaleEventStatus::Cancelled, 24, 48, now).is_live_at(now));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = Utc::now();
        assert!(event(SaleEventStatus::Cancelled, 0, 0, now).is_live_at(now));
    }

    #[test]
    fn test_status_round_trip_through_str() {
        assert_eq!("active".parse::<SaleEventStatus>().unwrap(), SaleEventStatus::Active);
        assert_eq!(SaleEventStatus::Cancelled.to_string(), "CANCELLED");
        assert!("ARCHIVED".parse::<SaleEventStatus>().is_err());
        assert_eq!(
            serde_json::to_value(SaleEventStatus::Upcoming).unwrap(),
            serde_json::json!("UPCOMING")
        );
    }
}
