//! Data models for Porchlight.
//!
//! Everything here is an immutable value type. Snapshots arrive from the
//! inspection backend or from API clients, derived results are computed
//! fresh on every request, and nothing outlives a single computation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inspection status of a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// No open findings.
    Ok,
    /// Open important findings, nothing critical.
    Attention,
    /// At least one open critical finding.
    Critical,
}

impl PropertyStatus {
    /// Derive a status from issue counts, for records that omit one.
    pub fn from_issue_counts(critical: u32, important: u32) -> Self {
        if critical > 0 {
            PropertyStatus::Critical
        } else if important > 0 {
            PropertyStatus::Attention
        } else {
            PropertyStatus::Ok
        }
    }

    /// Parse the wire/storage form of a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ok" => Some(PropertyStatus::Ok),
            "attention" => Some(PropertyStatus::Attention),
            "critical" => Some(PropertyStatus::Critical),
            _ => None,
        }
    }

    /// Storage form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Ok => "ok",
            PropertyStatus::Attention => "attention",
            PropertyStatus::Critical => "critical",
        }
    }
}

/// Latest inspection snapshot for a single property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySnapshot {
    /// Identifier assigned by the inspection backend.
    pub property_id: String,

    /// Current status as reported (or derived from the issue counts).
    pub status: PropertyStatus,

    /// Open critical findings.
    pub critical_issue_count: u32,

    /// Open important findings.
    pub important_issue_count: u32,

    /// When the property was last inspected, if it ever has been.
    pub last_inspection_date: Option<DateTime<Utc>>,
}

/// Point-in-time view of the whole portfolio.
///
/// `properties_with_critical` never exceeds `total_properties`. No relation
/// between `total_critical_issues` and `properties_with_critical` is
/// guaranteed by the source data: a property can be flagged critical while
/// its issue counts lag behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_properties: u32,
    pub total_critical_issues: u32,
    pub total_important_issues: u32,
    pub properties_with_critical: u32,

    /// Per-property snapshots, ordered by property id.
    pub properties: Vec<PropertySnapshot>,
}

impl PortfolioSnapshot {
    /// A portfolio with no properties.
    pub fn empty() -> Self {
        Self {
            total_properties: 0,
            total_critical_issues: 0,
            total_important_issues: 0,
            properties_with_critical: 0,
            properties: Vec::new(),
        }
    }

    /// Build a portfolio from property snapshots, computing the totals.
    pub fn from_properties(properties: Vec<PropertySnapshot>) -> Self {
        let total_critical_issues = properties.iter().map(|p| p.critical_issue_count).sum();
        let total_important_issues = properties.iter().map(|p| p.important_issue_count).sum();
        let properties_with_critical = properties
            .iter()
            .filter(|p| p.status == PropertyStatus::Critical)
            .count() as u32;

        Self {
            total_properties: properties.len() as u32,
            total_critical_issues,
            total_important_issues,
            properties_with_critical,
            properties,
        }
    }
}

/// Qualitative label attached to a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

impl HealthLabel {
    /// Classify a 0-100 score.
    ///
    /// # Thresholds
    ///
    /// - `Excellent`: score >= 80
    /// - `Good`: 60 <= score < 80
    /// - `Fair`: 40 <= score < 60
    /// - `NeedsAttention`: score < 40
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            HealthLabel::Excellent
        } else if score >= 60 {
            HealthLabel::Good
        } else if score >= 40 {
            HealthLabel::Fair
        } else {
            HealthLabel::NeedsAttention
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            HealthLabel::Excellent => "Excellent",
            HealthLabel::Good => "Good",
            HealthLabel::Fair => "Fair",
            HealthLabel::NeedsAttention => "Needs Attention",
        }
    }
}

/// Result of a health score computation. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthScoreResult {
    /// Portfolio health, 0-100.
    pub score: u8,

    /// Qualitative label for the score.
    pub label: HealthLabel,
}

/// Coarse risk bucket derived from a 0-100 risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Bucket a risk percentage.
    ///
    /// # Thresholds
    ///
    /// - `Low`: risk < 26
    /// - `Medium`: 26 <= risk <= 50
    /// - `High`: 51 <= risk <= 75
    /// - `Critical`: risk >= 76
    pub fn from_risk_level(risk_level: u8) -> Self {
        if risk_level >= 76 {
            RiskTier::Critical
        } else if risk_level >= 51 {
            RiskTier::High
        } else if risk_level >= 26 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }
}

/// Request body for POST /properties.
///
/// Only the property id is required. Counts default to zero, the status is
/// derived from the counts when omitted, and dates are RFC 3339.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRequest {
    /// The property this snapshot belongs to.
    pub property_id: String,

    /// Reported status; derived from the issue counts when absent.
    #[serde(default)]
    pub status: Option<PropertyStatus>,

    /// Open critical findings (defaults to 0).
    #[serde(default)]
    pub critical_issue_count: u32,

    /// Open important findings (defaults to 0).
    #[serde(default)]
    pub important_issue_count: u32,

    /// When the property was last inspected.
    #[serde(default)]
    pub last_inspection_date: Option<DateTime<Utc>>,

    /// When the most recent critical finding was recorded. Falls back to
    /// the upsert time when the snapshot carries critical findings without
    /// a date.
    #[serde(default)]
    pub latest_critical_issue_date: Option<DateTime<Utc>>,
}

/// Query parameters for GET /score.
#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// Weight profile to apply: "standard" (default) or "quick".
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_profile() -> String {
    "standard".to_string()
}

/// Response for GET /score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    /// The weight profile that was applied.
    pub profile: String,

    /// Portfolio health, 0-100.
    pub score: u8,

    /// Qualitative label for the score.
    pub label: HealthLabel,

    /// Number of properties the score covers.
    pub total_properties: u32,
}

/// Query parameters for GET /season.
#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    /// Calendar date to resolve, YYYY-MM-DD (defaults to today).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for GET /reports.
#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    /// Street address of the property to list reports for.
    pub address: String,

    /// Maximum number of reports to return (default: 10).
    #[serde(default = "default_report_limit")]
    pub limit: u32,
}

fn default_report_limit() -> u32 {
    10
}

/// Response for POST /sync.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    /// Snapshots pulled from the backend and stored.
    pub synced: u32,

    /// Properties known to storage after the sync.
    pub total_properties: u32,

    /// When the sync ran.
    pub timestamp: DateTime<Utc>,
}
