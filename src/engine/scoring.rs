//! Portfolio health scoring.
//!
//! The score starts at 100 and loses points per open issue and per property
//! whose inspection is stale. Two historical call sites used divergent
//! weights; both are expressed as [`WeightProfile`] configurations of the
//! one computation here.

use chrono::{DateTime, Utc};

use crate::model::{HealthLabel, HealthScoreResult, PortfolioSnapshot};

/// Weights applied when folding a portfolio snapshot into a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightProfile {
    /// Points deducted per open critical issue.
    pub critical_weight: u32,

    /// Points deducted per open important issue.
    pub important_weight: u32,

    /// Points deducted per property with a missing or stale inspection.
    pub recency_weight: u32,

    /// An inspection strictly older than this many whole days is stale.
    pub recency_threshold_days: u32,
}

impl Default for WeightProfile {
    /// The owner-dashboard profile: 15 per critical, 5 per important,
    /// 10 per property not inspected within 90 days.
    fn default() -> Self {
        Self {
            critical_weight: 15,
            important_weight: 5,
            recency_weight: 10,
            recency_threshold_days: 90,
        }
    }
}

impl WeightProfile {
    /// The lighter profile used for quick estimates: 10 per critical,
    /// 5 per important, no recency term.
    pub fn quick_estimate() -> Self {
        Self {
            critical_weight: 10,
            important_weight: 5,
            recency_weight: 0,
            recency_threshold_days: 90,
        }
    }
}

/// Compute the portfolio health score under the given weight profile.
///
/// Starts at 100, subtracts `critical_weight` per critical issue,
/// `important_weight` per important issue, and `recency_weight` once per
/// property whose last inspection is missing or stale, then clamps the
/// result to [0, 100].
///
/// The recency penalty applies even when the portfolio has zero issues;
/// a spotless portfolio with overdue inspections does not score 100.
/// Deterministic given `now`; never panics.
pub fn compute_health_score(
    profile: &WeightProfile,
    portfolio: &PortfolioSnapshot,
    now: DateTime<Utc>,
) -> HealthScoreResult {
    let mut score: i64 = 100;

    score -= i64::from(portfolio.total_critical_issues) * i64::from(profile.critical_weight);
    score -= i64::from(portfolio.total_important_issues) * i64::from(profile.important_weight);

    for property in &portfolio.properties {
        if is_inspection_stale(property.last_inspection_date, profile.recency_threshold_days, now) {
            score -= i64::from(profile.recency_weight);
        }
    }

    let score = score.clamp(0, 100) as u8;

    HealthScoreResult {
        score,
        label: HealthLabel::from_score(score),
    }
}

/// A missing inspection date counts as stale, as does one strictly older
/// than the threshold in whole days.
fn is_inspection_stale(
    last_inspection: Option<DateTime<Utc>>,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> bool {
    match last_inspection {
        Some(date) => (now - date).num_days() > i64::from(threshold_days),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertySnapshot, PropertyStatus};
    use chrono::Duration;

    fn property(id: &str, last_inspection: Option<DateTime<Utc>>) -> PropertySnapshot {
        PropertySnapshot {
            property_id: id.to_string(),
            status: PropertyStatus::Ok,
            critical_issue_count: 0,
            important_issue_count: 0,
            last_inspection_date: last_inspection,
        }
    }

    fn portfolio_with_counts(critical: u32, important: u32) -> PortfolioSnapshot {
        PortfolioSnapshot {
            total_critical_issues: critical,
            total_important_issues: important,
            ..PortfolioSnapshot::empty()
        }
    }

    #[test]
    fn test_default_profile_example() {
        // 100 - 2*15 - 3*5 = 55, no properties so no recency penalty
        let result = compute_health_score(
            &WeightProfile::default(),
            &portfolio_with_counts(2, 3),
            Utc::now(),
        );

        assert_eq!(result.score, 55);
        assert_eq!(result.label, HealthLabel::Fair);
    }

    #[test]
    fn test_score_clamped_to_zero() {
        let result = compute_health_score(
            &WeightProfile::default(),
            &portfolio_with_counts(10, 0),
            Utc::now(),
        );

        assert_eq!(result.score, 0);
        assert_eq!(result.label, HealthLabel::NeedsAttention);
    }

    #[test]
    fn test_no_issues_no_properties_scores_100() {
        let result = compute_health_score(
            &WeightProfile::default(),
            &PortfolioSnapshot::empty(),
            Utc::now(),
        );

        assert_eq!(result.score, 100);
        assert_eq!(result.label, HealthLabel::Excellent);
    }

    #[test]
    fn test_recency_penalty_applies_with_zero_issues() {
        // Zero issues does not guarantee 100: overdue inspections still cost points
        let now = Utc::now();
        let mut portfolio = PortfolioSnapshot::empty();
        portfolio.properties = vec![
            property("prop-1", None),
            property("prop-2", Some(now - Duration::days(120))),
            property("prop-3", Some(now - Duration::days(5))),
        ];
        portfolio.total_properties = 3;

        let result = compute_health_score(&WeightProfile::default(), &portfolio, now);

        // Two stale properties at 10 points each
        assert_eq!(result.score, 80);
        assert_eq!(result.label, HealthLabel::Excellent);
    }

    #[test]
    fn test_recency_threshold_is_strict() {
        let now = Utc::now();
        let mut portfolio = PortfolioSnapshot::empty();
        portfolio.properties = vec![property("prop-1", Some(now - Duration::days(90)))];
        portfolio.total_properties = 1;

        // Exactly 90 days is not stale
        let result = compute_health_score(&WeightProfile::default(), &portfolio, now);
        assert_eq!(result.score, 100);

        portfolio.properties = vec![property("prop-1", Some(now - Duration::days(91)))];
        let result = compute_health_score(&WeightProfile::default(), &portfolio, now);
        assert_eq!(result.score, 90);
    }

    #[test]
    fn test_quick_profile_ignores_recency() {
        let now = Utc::now();
        let mut portfolio = portfolio_with_counts(2, 3);
        portfolio.properties = vec![property("prop-1", None), property("prop-2", None)];
        portfolio.total_properties = 2;

        // 100 - 2*10 - 3*5 = 65, stale properties cost nothing
        let result = compute_health_score(&WeightProfile::quick_estimate(), &portfolio, now);

        assert_eq!(result.score, 65);
        assert_eq!(result.label, HealthLabel::Good);
    }

    #[test]
    fn test_score_matches_closed_form_and_stays_in_range() {
        // With zero properties the recency term contributes nothing, so the
        // score is exactly clamp(100 - 15c - 5i, 0, 100)
        let now = Utc::now();
        for critical in [0u32, 1, 5, 50, 1000] {
            for important in [0u32, 1, 5, 50, 1000] {
                let result = compute_health_score(
                    &WeightProfile::default(),
                    &portfolio_with_counts(critical, important),
                    now,
                );
                let expected =
                    (100 - 15 * i64::from(critical) - 5 * i64::from(important)).clamp(0, 100);
                assert_eq!(i64::from(result.score), expected);
            }
        }
    }

    #[test]
    fn test_future_dated_inspection_is_not_stale() {
        let now = Utc::now();
        let mut portfolio = PortfolioSnapshot::empty();
        portfolio.properties = vec![property("prop-1", Some(now + Duration::days(3)))];
        portfolio.total_properties = 1;

        let result = compute_health_score(&WeightProfile::default(), &portfolio, now);
        assert_eq!(result.score, 100);
    }
}
