//! SQLite storage layer for Porchlight.
//!
//! Two tables: `property_snapshots` holds the latest snapshot per property
//! (upserted on every ingest), and `critical_events` is an append-only log
//! of critical findings that the streak calculation reads with `MAX(ts)`.
//! Timestamps are stored as unix seconds.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::model::{PortfolioSnapshot, PropertySnapshot, PropertyStatus, SnapshotRequest};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Create a new storage instance and initialize the schema.
    ///
    /// # Arguments
    ///
    /// * `database_url` - SQLite connection string (e.g., "sqlite:porchlight.db" or "sqlite::memory:")
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let storage = Self { pool };
        storage.initialize_schema().await?;

        Ok(storage)
    }

    /// Create the database schema if it doesn't exist.
    async fn initialize_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS property_snapshots (
                property_id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                critical_issues INTEGER NOT NULL,
                important_issues INTEGER NOT NULL,
                last_inspection_ts INTEGER,
                updated_ts INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS critical_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                property_id TEXT NOT NULL,
                ts INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Index for the MAX(ts) streak query
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_critical_events_ts
            ON critical_events(ts)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace the latest snapshot for a property.
    ///
    /// A snapshot that carries critical findings also appends a critical
    /// event, dated by the request's `latest_critical_issue_date` when
    /// present and by `now` otherwise. The status is derived from the
    /// issue counts when the request omits one.
    pub async fn upsert_snapshot(
        &self,
        request: &SnapshotRequest,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let status = request.status.unwrap_or_else(|| {
            PropertyStatus::from_issue_counts(
                request.critical_issue_count,
                request.important_issue_count,
            )
        });

        sqlx::query(
            r#"
            INSERT INTO property_snapshots
                (property_id, status, critical_issues, important_issues, last_inspection_ts, updated_ts)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(property_id) DO UPDATE SET
                status = excluded.status,
                critical_issues = excluded.critical_issues,
                important_issues = excluded.important_issues,
                last_inspection_ts = excluded.last_inspection_ts,
                updated_ts = excluded.updated_ts
            "#,
        )
        .bind(&request.property_id)
        .bind(status.as_str())
        .bind(request.critical_issue_count)
        .bind(request.important_issue_count)
        .bind(request.last_inspection_date.map(|d| d.timestamp()))
        .bind(now.timestamp())
        .execute(&self.pool)
        .await?;

        if request.critical_issue_count > 0 {
            let ts = request.latest_critical_issue_date.unwrap_or(now).timestamp();

            sqlx::query(
                r#"
                INSERT INTO critical_events (property_id, ts)
                VALUES (?, ?)
                "#,
            )
            .bind(&request.property_id)
            .bind(ts)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Load the current portfolio, totals computed in SQL.
    ///
    /// Properties come back ordered by id. `properties_with_critical`
    /// counts properties in critical status, independent of their issue
    /// counts.
    pub async fn load_portfolio(&self) -> anyhow::Result<PortfolioSnapshot> {
        let rows = sqlx::query(
            r#"
            SELECT property_id, status, critical_issues, important_issues, last_inspection_ts
            FROM property_snapshots
            ORDER BY property_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let properties: Vec<PropertySnapshot> = rows
            .iter()
            .map(|row| {
                let critical_issue_count: u32 = row.get("critical_issues");
                let important_issue_count: u32 = row.get("important_issues");
                let status_text: String = row.get("status");
                let status = PropertyStatus::parse(&status_text).unwrap_or_else(|| {
                    PropertyStatus::from_issue_counts(critical_issue_count, important_issue_count)
                });
                let last_inspection_ts: Option<i64> = row.get("last_inspection_ts");

                PropertySnapshot {
                    property_id: row.get("property_id"),
                    status,
                    critical_issue_count,
                    important_issue_count,
                    last_inspection_date: last_inspection_ts
                        .and_then(|ts| DateTime::from_timestamp(ts, 0)),
                }
            })
            .collect();

        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) as total,
                   COALESCE(SUM(critical_issues), 0) as critical_total,
                   COALESCE(SUM(important_issues), 0) as important_total,
                   COALESCE(SUM(CASE WHEN status = 'critical' THEN 1 ELSE 0 END), 0) as with_critical
            FROM property_snapshots
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PortfolioSnapshot {
            total_properties: totals.get("total"),
            total_critical_issues: totals.get("critical_total"),
            total_important_issues: totals.get("important_total"),
            properties_with_critical: totals.get("with_critical"),
            properties,
        })
    }

    /// Timestamp of the most recent critical finding across the portfolio.
    ///
    /// # Returns
    ///
    /// The timestamp of the latest critical event, or None if no critical
    /// finding was ever recorded.
    pub async fn latest_critical_issue_date(&self) -> anyhow::Result<Option<DateTime<Utc>>> {
        let row = sqlx::query(
            r#"
            SELECT MAX(ts) as latest_ts
            FROM critical_events
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let latest_ts: Option<i64> = row.get("latest_ts");
        Ok(latest_ts.and_then(|ts| DateTime::from_timestamp(ts, 0)))
    }

    /// Number of properties with a stored snapshot.
    pub async fn known_property_count(&self) -> anyhow::Result<u32> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as total FROM property_snapshots
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }
}
