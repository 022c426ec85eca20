//! Integration tests for Porchlight API endpoints.
//!
//! These tests verify the full request/response cycle through the HTTP API.

use axum::{Router, routing::get, routing::post};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;

use porchlight::api::{
    AppState, get_overview, get_reports, get_score, get_season, get_streak, health_check,
    post_property, post_sync,
};
use porchlight::storage::Storage;

async fn create_test_server() -> TestServer {
    let storage = Storage::new("sqlite::memory:").await.unwrap();
    let state = AppState {
        storage,
        backend: None, // Backend not needed for core API tests
    };

    let app = Router::new()
        .route("/properties", post(post_property))
        .route("/overview", get(get_overview))
        .route("/score", get(get_score))
        .route("/streak", get(get_streak))
        .route("/season", get(get_season))
        .route("/reports", get(get_reports))
        .route("/sync", post(post_sync))
        .route("/health", get(health_check))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_post_property() {
    let server = create_test_server().await;

    let response = server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-1",
            "critical_issue_count": 1,
            "important_issue_count": 2
        }))
        .await;

    response.assert_status(axum::http::StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_post_property_defaults() {
    let server = create_test_server().await;

    let response = server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-1"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_overview_empty_portfolio() {
    let server = create_test_server().await;

    let response = server.get("/overview").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["health"]["score"], 100);
    assert_eq!(body["health"]["label"], "Excellent");
    assert_eq!(body["total_properties"], 0);
    // No critical finding ever recorded: sentinel streak
    assert_eq!(body["streak"]["days_since_last_critical_issue"], 365);
    assert_eq!(body["streak"]["milestone_label"], "1 Year Streak");
    assert!(body["alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_overview_with_critical_property() {
    let server = create_test_server().await;

    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-1",
            "critical_issue_count": 2,
            "last_inspection_date": (Utc::now() - Duration::days(3)).to_rfc3339()
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    let response = server.get("/overview").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    // 100 - 2*15, inspection is fresh
    assert_eq!(body["health"]["score"], 70);
    assert_eq!(body["health"]["label"], "Good");
    assert_eq!(body["properties_with_critical"], 1);
    // Critical event recorded at upsert time; a second boundary between
    // the upsert and this query rounds up to one day
    assert!(body["streak"]["days_since_last_critical_issue"].as_i64().unwrap() <= 1);

    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert!(
        alerts[0]["message"]
            .as_str()
            .unwrap()
            .contains("URGENT")
    );
}

#[tokio::test]
async fn test_score_profiles() {
    let server = create_test_server().await;

    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-1",
            "critical_issue_count": 2,
            "important_issue_count": 3
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    // Standard profile: 100 - 2*15 - 3*5 - 10 (no inspection on record)
    let response = server.get("/score").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["profile"], "standard");
    assert_eq!(body["score"], 45);
    assert_eq!(body["label"], "Fair");

    // Quick profile: 100 - 2*10 - 3*5, no recency term
    let response = server.get("/score?profile=quick").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 65);
    assert_eq!(body["label"], "Good");
}

#[tokio::test]
async fn test_score_rejects_unknown_profile() {
    let server = create_test_server().await;

    let response = server.get("/score?profile=bogus").await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_streak_empty_portfolio() {
    let server = create_test_server().await;

    let response = server.get("/streak").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["days_since_last_critical_issue"], 365);
    assert_eq!(body["milestone_label"], "1 Year Streak");
    assert_eq!(body["next_milestone_days"], 730);
}

#[tokio::test]
async fn test_season_peak() {
    let server = create_test_server().await;

    let response = server.get("/season?date=2026-08-15").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Peak Hurricane Season");
    assert_eq!(body["risk_level"], 95);
    assert_eq!(body["risk_tier"], "CRITICAL");
    assert_eq!(body["next_season_name"], "Late Hurricane Season");
    // Aug 15 to Nov 1
    assert_eq!(body["days_until_next_season"], 78);
}

#[tokio::test]
async fn test_season_dry() {
    let server = create_test_server().await;

    let response = server.get("/season?date=2026-01-15").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Dry Season");
    assert_eq!(body["risk_level"], 15);
    assert_eq!(body["risk_tier"], "LOW");
    assert_eq!(body["next_season_name"], "Pre-Hurricane Prep Season");
    // Jan 15 to May 1 of the same year
    assert_eq!(body["days_until_next_season"], 106);
}

#[tokio::test]
async fn test_season_defaults_to_today() {
    let server = create_test_server().await;

    let response = server.get("/season").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["name"].as_str().unwrap().contains("Season"));
    assert!(body["days_until_next_season"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn test_sync_without_backend() {
    let server = create_test_server().await;

    let response = server.post("/sync").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_reports_without_backend() {
    let server = create_test_server().await;

    let response = server.get("/reports?address=12+Palm+Ave").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_full_workflow() {
    let server = create_test_server().await;

    // 1. Health check
    server.get("/health").await.assert_status_ok();

    // 2. Record snapshots for a small portfolio
    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-a",
            "last_inspection_date": (Utc::now() - Duration::days(10)).to_rfc3339()
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-b",
            "important_issue_count": 2,
            "last_inspection_date": (Utc::now() - Duration::days(30)).to_rfc3339()
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-c",
            "critical_issue_count": 1,
            "important_issue_count": 1
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    // 3. Overview reflects the whole portfolio
    let response = server.get("/overview").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_properties"], 3);
    assert_eq!(body["total_critical_issues"], 1);
    assert_eq!(body["total_important_issues"], 3);
    assert_eq!(body["properties_with_critical"], 1);
    // 100 - 1*15 - 3*5 - 10 (prop-c has no inspection on record)
    assert_eq!(body["health"]["score"], 60);
    assert_eq!(body["health"]["label"], "Good");
    assert!(body["streak"]["days_since_last_critical_issue"].as_i64().unwrap() <= 1);

    // prop-c raises both a critical and an overdue alert
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts[0]["message"].as_str().unwrap().contains("URGENT"));
    assert!(alerts[1]["message"].as_str().unwrap().contains("OVERDUE"));

    // 4. Fixing the critical issue improves the score on the next upsert
    server
        .post("/properties")
        .json(&json!({
            "property_id": "prop-c",
            "important_issue_count": 1,
            "last_inspection_date": Utc::now().to_rfc3339()
        }))
        .await
        .assert_status(axum::http::StatusCode::ACCEPTED);

    let response = server.get("/overview").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    // 100 - 3*5, every inspection now fresh
    assert_eq!(body["health"]["score"], 85);
    assert_eq!(body["health"]["label"], "Excellent");
    assert!(body["alerts"].as_array().unwrap().is_empty());
    // The critical event stays in history; the streak still counts from it
    assert!(body["streak"]["days_since_last_critical_issue"].as_i64().unwrap() <= 1);
}
