//! Assembly of the owner dashboard overview.
//!
//! Pulls the stored portfolio, runs the engine over it, and flags the
//! properties that need the owner's attention. All derivation is done by
//! the pure engine functions; this module only wires storage to them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::scoring::{self, WeightProfile};
use crate::engine::season::{self, SeasonDescriptor};
use crate::engine::streak::{self, StreakResult};
use crate::model::{HealthScoreResult, PortfolioSnapshot, PropertyStatus};
use crate::storage::Storage;

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    /// When this overview was generated.
    pub timestamp: DateTime<Utc>,

    /// Portfolio health under the dashboard weight profile.
    pub health: HealthScoreResult,

    /// Days since the last critical finding.
    pub streak: StreakResult,

    /// Hurricane-season window containing today.
    pub season: SeasonDescriptor,

    pub total_properties: u32,
    pub total_critical_issues: u32,
    pub total_important_issues: u32,
    pub properties_with_critical: u32,

    /// Properties needing attention, critical first.
    pub alerts: Vec<PropertyAlert>,
}

/// A single property needing the owner's attention.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyAlert {
    /// The property the alert concerns.
    pub property_id: String,

    /// Current status of the property.
    pub status: PropertyStatus,

    /// When the property was last inspected (if ever).
    pub last_inspection_date: Option<DateTime<Utc>>,

    /// Human-readable description of the alert.
    pub message: String,
}

/// Build the dashboard overview as of `now`.
///
/// # Arguments
///
/// * `storage` - Database connection
/// * `profile` - Weight profile for the health score
/// * `now` - Reference timestamp (typically current time)
pub async fn build_overview(
    storage: &Storage,
    profile: &WeightProfile,
    now: DateTime<Utc>,
) -> anyhow::Result<OverviewResponse> {
    let portfolio = storage.load_portfolio().await?;
    let latest_critical = storage.latest_critical_issue_date().await?;

    let health = scoring::compute_health_score(profile, &portfolio, now);
    let streak = streak::compute_streak(latest_critical, now);
    let season = season::resolve_season(now.date_naive());
    let alerts = generate_property_alerts(&portfolio, profile.recency_threshold_days, now);

    Ok(OverviewResponse {
        timestamp: now,
        health,
        streak,
        season,
        total_properties: portfolio.total_properties,
        total_critical_issues: portfolio.total_critical_issues,
        total_important_issues: portfolio.total_important_issues,
        properties_with_critical: portfolio.properties_with_critical,
        alerts,
    })
}

/// Flag every critical property and every property overdue for inspection.
///
/// A property can raise both alerts at once. Critical alerts come first,
/// then overdue alerts, each group in portfolio order.
pub fn generate_property_alerts(
    portfolio: &PortfolioSnapshot,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Vec<PropertyAlert> {
    let mut critical = Vec::new();
    let mut overdue = Vec::new();

    for property in &portfolio.properties {
        if property.status == PropertyStatus::Critical {
            critical.push(PropertyAlert {
                property_id: property.property_id.clone(),
                status: property.status,
                last_inspection_date: property.last_inspection_date,
                message: format!(
                    "URGENT: Property '{}' has {} open critical issue(s). \
                     Schedule remediation immediately.",
                    property.property_id, property.critical_issue_count
                ),
            });
        }

        match property.last_inspection_date {
            Some(date) if (now - date).num_days() <= i64::from(threshold_days) => {}
            Some(date) => overdue.push(PropertyAlert {
                property_id: property.property_id.clone(),
                status: property.status,
                last_inspection_date: property.last_inspection_date,
                message: format!(
                    "OVERDUE: Property '{}' was last inspected {} days ago, \
                     past the {}-day window.",
                    property.property_id,
                    (now - date).num_days(),
                    threshold_days
                ),
            }),
            None => overdue.push(PropertyAlert {
                property_id: property.property_id.clone(),
                status: property.status,
                last_inspection_date: None,
                message: format!(
                    "OVERDUE: Property '{}' has no recorded inspection.",
                    property.property_id
                ),
            }),
        }
    }

    critical.extend(overdue);
    critical
}
