//! Issue-free streak tracking.
//!
//! Counts whole days since the most recent critical finding and classifies
//! the run against fixed milestones. A portfolio with no recorded critical
//! finding is credited with a 365-day streak; that sentinel is a product
//! convention, kept deliberately rather than reporting "no streak".

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Streak credited when no critical finding has ever been recorded.
pub const NO_ISSUE_SENTINEL_DAYS: i64 = 365;

/// Milestone thresholds paired with their display labels, highest first.
const MILESTONES: [(i64, &str); 5] = [
    (365, "1 Year Streak"),
    (180, "6 Month Streak"),
    (90, "90 Day Streak"),
    (30, "30 Day Streak"),
    (7, "1 Week Streak"),
];

/// Milestone ladder used for the next-target pointer.
const TARGETS: [i64; 6] = [7, 30, 90, 180, 365, 730];

const SECONDS_PER_DAY: i64 = 86_400;

/// How long the portfolio has gone without a critical finding.
/// Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreakResult {
    /// Whole days since the last critical finding.
    pub days_since_last_critical_issue: i64,

    /// Highest milestone the streak has reached, if any.
    pub milestone_label: Option<&'static str>,

    /// Next milestone on the ladder, absent once past the last one.
    pub next_milestone_days: Option<i64>,

    /// Progress toward the next milestone, 0-100.
    pub progress_percent: f64,
}

/// Compute the issue-free streak as of `now`.
///
/// The day count is the ceiling of the absolute distance between the two
/// timestamps, so a partial day counts as a full one and a future-dated
/// finding never produces a negative streak. Milestone thresholds are
/// inclusive: day 7 is already a "1 Week Streak".
pub fn compute_streak(
    latest_critical_issue_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> StreakResult {
    let days = match latest_critical_issue_date {
        Some(date) => {
            (now - date).num_seconds().unsigned_abs().div_ceil(SECONDS_PER_DAY as u64) as i64
        }
        None => NO_ISSUE_SENTINEL_DAYS,
    };

    let milestone_label = MILESTONES
        .iter()
        .find(|(threshold, _)| days >= *threshold)
        .map(|(_, label)| *label);

    let next_milestone_days = TARGETS.iter().copied().find(|target| *target > days);
    let progress_percent = match next_milestone_days {
        Some(target) => (days as f64 / target as f64 * 100.0).clamp(0.0, 100.0),
        None => 100.0,
    };

    StreakResult {
        days_since_last_critical_issue: days,
        milestone_label,
        next_milestone_days,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_no_date_uses_sentinel() {
        let result = compute_streak(None, Utc::now());

        assert_eq!(result.days_since_last_critical_issue, 365);
        assert_eq!(result.milestone_label, Some("1 Year Streak"));
        assert_eq!(result.next_milestone_days, Some(730));
        assert!((result.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_issue_today_is_day_zero() {
        let now = Utc::now();
        let result = compute_streak(Some(now), now);

        assert_eq!(result.days_since_last_critical_issue, 0);
        assert_eq!(result.milestone_label, None);
        assert_eq!(result.next_milestone_days, Some(7));
        assert_eq!(result.progress_percent, 0.0);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let now = Utc::now();
        let result = compute_streak(Some(now - Duration::hours(36)), now);

        assert_eq!(result.days_since_last_critical_issue, 2);
        assert_eq!(result.milestone_label, None);
    }

    #[test]
    fn test_future_date_counts_by_magnitude() {
        let now = Utc::now();
        let past = compute_streak(Some(now - Duration::days(30)), now);
        let future = compute_streak(Some(now + Duration::days(30)), now);

        assert_eq!(
            past.days_since_last_critical_issue,
            future.days_since_last_critical_issue
        );
        assert_eq!(past.milestone_label, future.milestone_label);
    }

    #[test]
    fn test_milestones_inclusive_at_boundary() {
        let now = Utc::now();
        let cases = [
            (7, "1 Week Streak"),
            (30, "30 Day Streak"),
            (90, "90 Day Streak"),
            (180, "6 Month Streak"),
            (365, "1 Year Streak"),
        ];

        for (days, label) in cases {
            let result = compute_streak(Some(now - Duration::days(days)), now);
            assert_eq!(result.days_since_last_critical_issue, days);
            assert_eq!(result.milestone_label, Some(label), "at {days} days");
        }
    }

    #[test]
    fn test_below_first_milestone() {
        let now = Utc::now();
        let result = compute_streak(Some(now - Duration::days(6)), now);

        assert_eq!(result.milestone_label, None);
        assert_eq!(result.next_milestone_days, Some(7));
        assert!((result.progress_percent - 6.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_next_target_is_strictly_greater() {
        let now = Utc::now();
        let result = compute_streak(Some(now - Duration::days(90)), now);

        assert_eq!(result.milestone_label, Some("90 Day Streak"));
        assert_eq!(result.next_milestone_days, Some(180));
        assert!((result.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_past_final_target() {
        let now = Utc::now();
        let result = compute_streak(Some(now - Duration::days(800)), now);

        assert_eq!(result.days_since_last_critical_issue, 800);
        assert_eq!(result.milestone_label, Some("1 Year Streak"));
        assert_eq!(result.next_milestone_days, None);
        assert_eq!(result.progress_percent, 100.0);
    }
}
