mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{vehicle_body, TestApp};
use deal_machine::models::SaleEventStatus;

#[tokio::test]
async fn test_create_sale_event() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/sale-events",
            json!({
                "title": "Weekly Dealer Auction",
                "start_date": "2026-11-02T15:00:00Z",
                "end_date": "2026-11-04T23:00:00Z",
                "external_link": "https://example.com/auction"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["title"], "Weekly Dealer Auction");
    assert_eq!(data["status"], "UPCOMING");
    assert_eq!(data["external_link"], "https://example.com/auction");
    let start: DateTime<Utc> = data["start_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(start, "2026-11-02T15:00:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[tokio::test]
async fn test_create_sale_event_accepts_form_dates() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/sale-events",
            json!({
                "title": "Holiday Clearance",
                "start_date": "2026-12-01T09:00",
                "end_date": "2026-12-03T18:30",
                "status": "ACTIVE"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "ACTIVE");
    let end: DateTime<Utc> = body["data"]["end_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(end, "2026-12-03T18:30:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[tokio::test]
async fn test_create_sale_event_requires_title_and_dates() {
    let app = TestApp::new();

    for body in [
        json!({ "start_date": "2026-11-02T15:00:00Z", "end_date": "2026-11-04T23:00:00Z" }),
        json!({ "title": "  ", "start_date": "2026-11-02T15:00:00Z", "end_date": "2026-11-04T23:00:00Z" }),
        json!({ "title": "Weekly Dealer Auction", "end_date": "2026-11-04T23:00:00Z" }),
        json!({ "title": "Weekly Dealer Auction", "start_date": "2026-11-02T15:00:00Z" }),
    ] {
        let (status, response) = app.post("/api/sale-events", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Title, start date, and end date are required");
    }
}

#[tokio::test]
async fn test_create_sale_event_rejects_bad_dates() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/sale-events",
            json!({ "title": "Broken", "start_date": "next tuesday", "end_date": "2026-11-04T23:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/sale-events",
            json!({ "title": "Backwards", "start_date": "2026-11-04T23:00:00Z", "end_date": "2026-11-02T15:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "End date must not be before start date");
}

#[tokio::test]
async fn test_list_sale_events_newest_start_first() {
    let app = TestApp::new();
    app.sale_events
        .seed("Past Sale", SaleEventStatus::Completed, Duration::days(-20), Duration::days(-19));
    app.sale_events
        .seed("Next Sale", SaleEventStatus::Upcoming, Duration::days(5), Duration::days(6));

    let (status, body) = app.get("/api/sale-events").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Next Sale", "Past Sale"]);
}

#[tokio::test]
async fn test_get_sale_event_lists_its_vehicles() {
    let app = TestApp::new();
    let event = app
        .sale_events
        .seed("Weekly Dealer Auction", SaleEventStatus::Active, Duration::hours(-2), Duration::days(1));

    let mut attached = vehicle_body("1HGCV1F34KA012345");
    attached["sale_event_id"] = json!(event.id);
    app.create_vehicle(attached).await;
    app.create_vehicle(vehicle_body("2T1BURHE0JC123456")).await;

    let (status, body) = app.get(&format!("/api/sale-events/{}", event.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Weekly Dealer Auction");
    let vehicles = body["vehicles"].as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["vin"], "1HGCV1F34KA012345");
}

#[tokio::test]
async fn test_get_unknown_sale_event_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get(&format!("/api/sale-events/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_sale_event() {
    let app = TestApp::new();
    let (_, created) = app
        .post(
            "/api/sale-events",
            json!({
                "title": "Weekly Dealer Auction",
                "start_date": "2026-11-02T15:00:00Z",
                "end_date": "2026-11-04T23:00:00Z",
                "external_link": "https://example.com/auction"
            }),
        )
        .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .patch(
            &format!("/api/sale-events/{}", id),
            json!({ "status": "COMPLETED", "external_link": null }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["status"], "COMPLETED");
    assert!(data["external_link"].is_null());
    assert_eq!(data["title"], "Weekly Dealer Auction");
}

#[tokio::test]
async fn test_patch_sale_event_keeps_window_ordered() {
    let app = TestApp::new();
    let event = app
        .sale_events
        .seed("Weekly Dealer Auction", SaleEventStatus::Upcoming, Duration::days(1), Duration::days(2));

    let (status, _) = app
        .patch(
            &format!("/api/sale-events/{}", event.id),
            json!({ "end_date": "2000-01-01T00:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .patch(&format!("/api/sale-events/{}", event.id), json!({ "title": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_unknown_sale_event_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .patch(&format!("/api/sale-events/{}", Uuid::new_v4()), json!({ "title": "Renamed" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
