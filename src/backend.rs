//! Client for the external inspection-report backend.
//!
//! The backend is the system of record for inspection reports and property
//! snapshots. Porchlight consumes it read-only through its existing REST
//! interface and never reimplements it; the service also runs fine with no
//! backend configured.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{PropertyStatus, SnapshotRequest};

/// Errors from the inspection backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: &'static str,
    },
}

/// Client for the inspection-report backend.
#[derive(Clone)]
pub struct InspectionBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl InspectionBackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the latest snapshot for every property in the portfolio.
    pub async fn get_portfolio(&self) -> Result<PortfolioResponse, BackendError> {
        let url = format!("{}/api/dashboard", self.base_url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status {
                status: response.status(),
                endpoint: "/api/dashboard",
            });
        }

        Ok(response.json::<PortfolioResponse>().await?)
    }

    /// Fetch recent inspection reports for a property address.
    ///
    /// # Arguments
    ///
    /// * `address` - Street address as the backend knows it
    /// * `limit` - Maximum number of reports to return
    pub async fn get_reports(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<ReportsResponse, BackendError> {
        let url = format!(
            "{}/api/reports?address={}&limit={}",
            self.base_url,
            urlencoding::encode(address),
            limit
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status {
                status: response.status(),
                endpoint: "/api/reports",
            });
        }

        Ok(response.json::<ReportsResponse>().await?)
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response from the backend dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    /// Latest snapshot per property.
    #[serde(default)]
    pub properties: Vec<BackendProperty>,
}

/// A property record as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendProperty {
    /// Property identifier.
    #[serde(default)]
    pub id: String,

    /// Status string ("ok", "attention", "critical").
    #[serde(default)]
    pub status: String,

    /// Open critical findings.
    #[serde(default, rename = "criticalIssues")]
    pub critical_issues: u32,

    /// Open important findings.
    #[serde(default, rename = "importantIssues")]
    pub important_issues: u32,

    /// RFC 3339; absent when the property has never been inspected.
    #[serde(default, rename = "lastInspectionDate")]
    pub last_inspection_date: Option<String>,

    /// RFC 3339; absent when no critical finding was ever recorded.
    #[serde(default, rename = "latestCriticalIssueDate")]
    pub latest_critical_issue_date: Option<String>,
}

impl BackendProperty {
    /// Get the last inspection date as a DateTime.
    pub fn last_inspection(&self) -> Option<DateTime<Utc>> {
        parse_rfc3339(self.last_inspection_date.as_deref())
    }

    /// Get the latest critical finding date as a DateTime.
    pub fn latest_critical_issue(&self) -> Option<DateTime<Utc>> {
        parse_rfc3339(self.latest_critical_issue_date.as_deref())
    }

    /// Convert into the ingest form used by storage. Unparseable status
    /// strings fall back to the count-derived status.
    pub fn to_snapshot_request(&self) -> SnapshotRequest {
        SnapshotRequest {
            property_id: self.id.clone(),
            status: PropertyStatus::parse(&self.status),
            critical_issue_count: self.critical_issues,
            important_issue_count: self.important_issues,
            last_inspection_date: self.last_inspection(),
            latest_critical_issue_date: self.latest_critical_issue(),
        }
    }
}

/// Response from the backend reports endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsResponse {
    /// Reports, newest first.
    #[serde(default)]
    pub reports: Vec<BackendReport>,

    /// Total reports the backend holds for the address.
    #[serde(default)]
    pub total: u32,
}

/// A single inspection report summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendReport {
    /// Report identifier.
    #[serde(default)]
    pub id: String,

    /// When the inspection ran (RFC 3339).
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,

    /// Critical findings in this report.
    #[serde(default, rename = "criticalIssues")]
    pub critical_issues: u32,

    /// Important findings in this report.
    #[serde(default, rename = "importantIssues")]
    pub important_issues: u32,

    /// One-paragraph inspector summary.
    #[serde(default)]
    pub summary: String,
}

impl BackendReport {
    /// Get the report timestamp as a DateTime.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_rfc3339(self.created_at.as_deref())
    }
}

fn parse_rfc3339(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
