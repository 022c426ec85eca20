//! HTTP API handlers for Porchlight.
//!
//! Handlers resolve "now" once, hand plain data to the engine, and map
//! failures to status codes. The inspection backend is optional: the
//! endpoints that need it answer 503 when it is not configured.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::backend::{InspectionBackendClient, ReportsResponse};
use crate::engine::scoring::{self, WeightProfile};
use crate::engine::season::{self, SeasonDescriptor};
use crate::engine::streak::{self, StreakResult};
use crate::model::{
    ReportsQuery, ScoreQuery, ScoreResponse, SeasonQuery, SnapshotRequest, SyncResponse,
};
use crate::overview::{self, OverviewResponse};
use crate::storage::Storage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub backend: Option<InspectionBackendClient>,
}

/// POST /properties - Record the latest snapshot for a property.
///
/// # Request Body
///
/// ```json
/// {
///     "property_id": "prop-12",
///     "critical_issue_count": 1,
///     "important_issue_count": 3,
///     "last_inspection_date": "2026-07-14T10:00:00Z"
/// }
/// ```
///
/// Counts default to 0 and the status is derived from them when omitted.
///
/// # Response
///
/// Returns `202 Accepted` on success.
#[instrument(skip(state), fields(property_id))]
pub async fn post_property(
    State(state): State<AppState>,
    Json(request): Json<SnapshotRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("property_id", request.property_id.as_str());

    match state.storage.upsert_snapshot(&request, Utc::now()).await {
        Ok(()) => {
            info!(
                property_id = %request.property_id,
                critical = request.critical_issue_count,
                important = request.important_issue_count,
                "Property snapshot recorded"
            );
            StatusCode::ACCEPTED
        }
        Err(e) => {
            warn!(
                property_id = %request.property_id,
                error = %e,
                "Failed to record property snapshot"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /overview - Full dashboard payload.
///
/// Health score under the dashboard profile, issue-free streak, the
/// current hurricane-season window, portfolio totals, and per-property
/// alerts.
#[instrument(skip(state))]
pub async fn get_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewResponse>, StatusCode> {
    let now = Utc::now();

    match overview::build_overview(&state.storage, &WeightProfile::default(), now).await {
        Ok(response) => {
            info!(
                score = response.health.score,
                streak_days = response.streak.days_since_last_critical_issue,
                alert_count = response.alerts.len(),
                "Overview queried"
            );
            Ok(Json(response))
        }
        Err(e) => {
            warn!(error = %e, "Failed to build overview");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /score - Portfolio health score only.
///
/// # Query Parameters
///
/// - `profile` (optional): "standard" (default) or "quick"
///
/// # Response
///
/// ```json
/// {
///     "profile": "standard",
///     "score": 55,
///     "label": "Fair",
///     "total_properties": 4
/// }
/// ```
#[instrument(skip(state))]
pub async fn get_score(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<ScoreResponse>, StatusCode> {
    let profile = match query.profile.as_str() {
        "standard" => WeightProfile::default(),
        "quick" => WeightProfile::quick_estimate(),
        other => {
            warn!(profile = %other, "Invalid weight profile");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let now = Utc::now();

    match state.storage.load_portfolio().await {
        Ok(portfolio) => {
            let result = scoring::compute_health_score(&profile, &portfolio, now);
            info!(
                profile = %query.profile,
                score = result.score,
                label = result.label.label(),
                "Score queried"
            );
            Ok(Json(ScoreResponse {
                profile: query.profile,
                score: result.score,
                label: result.label,
                total_properties: portfolio.total_properties,
            }))
        }
        Err(e) => {
            warn!(error = %e, "Failed to load portfolio");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /streak - Issue-free streak only.
#[instrument(skip(state))]
pub async fn get_streak(State(state): State<AppState>) -> Result<Json<StreakResult>, StatusCode> {
    let now = Utc::now();

    match state.storage.latest_critical_issue_date().await {
        Ok(latest) => {
            let result = streak::compute_streak(latest, now);
            info!(
                days = result.days_since_last_critical_issue,
                milestone = ?result.milestone_label,
                "Streak queried"
            );
            Ok(Json(result))
        }
        Err(e) => {
            warn!(error = %e, "Failed to load latest critical issue date");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /season - Hurricane-season window for a date.
///
/// # Query Parameters
///
/// - `date` (optional): calendar date as YYYY-MM-DD; defaults to today
#[instrument]
pub async fn get_season(Query(query): Query<SeasonQuery>) -> Json<SeasonDescriptor> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let descriptor = season::resolve_season(date);

    info!(
        %date,
        season = descriptor.name,
        risk_level = descriptor.risk_level,
        "Season resolved"
    );

    Json(descriptor)
}

/// GET /reports - Proxy the backend's report listing for an address.
///
/// # Query Parameters
///
/// - `address` (required): street address of the property
/// - `limit` (optional): maximum reports to return (default: 10)
#[instrument(skip(state))]
pub async fn get_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<ReportsResponse>, StatusCode> {
    let backend = state.backend.as_ref().ok_or_else(|| {
        warn!("Inspection backend not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    match backend.get_reports(&query.address, query.limit).await {
        Ok(response) => {
            info!(
                address = %query.address,
                report_count = response.reports.len(),
                "Reports queried"
            );
            Ok(Json(response))
        }
        Err(e) => {
            warn!(address = %query.address, error = %e, "Failed to fetch reports");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// POST /sync - Pull the portfolio from the backend into storage.
///
/// Fetches the backend's latest snapshot for every property and upserts
/// each one. Returns 503 when no backend is configured and 502 when the
/// backend cannot be reached.
#[instrument(skip(state))]
pub async fn post_sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, StatusCode> {
    let backend = state.backend.as_ref().ok_or_else(|| {
        warn!("Inspection backend not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let now = Utc::now();

    let portfolio = match backend.get_portfolio().await {
        Ok(portfolio) => portfolio,
        Err(e) => {
            warn!(error = %e, "Failed to fetch portfolio from backend");
            return Err(StatusCode::BAD_GATEWAY);
        }
    };

    let mut synced = 0u32;
    for record in &portfolio.properties {
        let request = record.to_snapshot_request();
        if let Err(e) = state.storage.upsert_snapshot(&request, now).await {
            warn!(property_id = %record.id, error = %e, "Failed to store synced snapshot");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        synced += 1;
    }

    let total_properties = match state.storage.known_property_count().await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Failed to count stored properties");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!(synced, total_properties, "Portfolio synced from backend");

    Ok(Json(SyncResponse {
        synced,
        total_properties,
        timestamp: now,
    }))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
