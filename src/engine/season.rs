//! Florida hurricane-season risk calendar.
//!
//! Maps a calendar date onto one of five fixed windows covering the whole
//! year, each carrying a static risk level and climate normals. This is a
//! lookup table, not a forecast: the figures describe the window, not live
//! weather.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::RiskTier;

/// A named stretch of the Florida hurricane calendar.
struct SeasonWindow {
    name: &'static str,

    /// Inclusive (month, day) bounds, re-anchored to the queried year.
    /// A start after the end marks a window that wraps the year boundary.
    start: (u32, u32),
    end: (u32, u32),

    /// Static risk percentage for the window, 0-100.
    risk_level: u8,

    temperature_band: &'static str,
    humidity: &'static str,
    monthly_rainfall: &'static str,
    historical_note: &'static str,
    warning: &'static str,
}

/// The five windows in calendar-cycle order. Non-overlapping and
/// exhaustive; the Dry Season wraps the year boundary.
const SEASON_WINDOWS: [SeasonWindow; 5] = [
    SeasonWindow {
        name: "Dry Season",
        start: (12, 1),
        end: (4, 30),
        risk_level: 15,
        temperature_band: "60-78°F",
        humidity: "around 65%",
        monthly_rainfall: "2-3 in",
        historical_note: "Tropical landfalls in this window are historically rare; \
            Florida's dry season brings the calmest weather of the year.",
        warning: "Low tropical risk. Good window for roof, seal, and drainage repairs.",
    },
    SeasonWindow {
        name: "Pre-Hurricane Prep Season",
        start: (5, 1),
        end: (5, 31),
        risk_level: 35,
        temperature_band: "72-88°F",
        humidity: "around 70%",
        monthly_rainfall: "3-4 in",
        historical_note: "May storms are uncommon but pre-season formations have \
            occurred in 7 of the last 10 years.",
        warning: "Hurricane season starts June 1. Complete preparedness checks now.",
    },
    SeasonWindow {
        name: "Early Hurricane Season",
        start: (6, 1),
        end: (7, 31),
        risk_level: 70,
        temperature_band: "74-91°F",
        humidity: "around 75%",
        monthly_rainfall: "7-8 in",
        historical_note: "Early-season storms typically form in the Gulf and the \
            western Caribbean, close to Florida.",
        warning: "Season underway. Verify drainage, tree clearance, and shutter hardware.",
    },
    SeasonWindow {
        name: "Peak Hurricane Season",
        start: (8, 1),
        end: (10, 31),
        risk_level: 95,
        temperature_band: "75-91°F",
        humidity: "around 78%",
        monthly_rainfall: "7-9 in",
        historical_note: "Roughly 85% of major hurricane activity falls in this \
            window, with the climatological peak around September 10.",
        warning: "Peak of season. Monitor forecasts weekly and keep shutters staged.",
    },
    SeasonWindow {
        name: "Late Hurricane Season",
        start: (11, 1),
        end: (11, 30),
        risk_level: 45,
        temperature_band: "65-81°F",
        humidity: "around 70%",
        monthly_rainfall: "2-3 in",
        historical_note: "Activity tapers through November; late-season storms favor \
            the Caribbean over the Florida coast.",
        warning: "Season ends November 30. Schedule post-season inspections.",
    },
];

/// Index of the Dry Season, the window that applies when no range matches.
const DRY_SEASON: usize = 0;

impl SeasonWindow {
    fn contains(&self, month: u32, day: u32) -> bool {
        let date = (month, day);
        if self.start > self.end {
            date >= self.start || date <= self.end
        } else {
            date >= self.start && date <= self.end
        }
    }

    /// Inclusive end of this window, anchored relative to `date`'s year.
    fn end_date_for(&self, date: NaiveDate) -> NaiveDate {
        let year = if self.start > self.end && date.month() >= self.start.0 {
            date.year() + 1
        } else {
            date.year()
        };

        NaiveDate::from_ymd_opt(year, self.end.0, self.end.1)
            .expect("window ends on a valid calendar date")
    }
}

/// Season resolved for a calendar date. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonDescriptor {
    pub name: &'static str,

    /// Static risk percentage for the window, 0-100.
    pub risk_level: u8,

    /// Coarse bucket for the risk level.
    pub risk_tier: RiskTier,

    /// Whole days from the queried date to the next window's first day.
    pub days_until_next_season: i64,

    pub next_season_name: &'static str,

    /// Climate normals for the window. Static lookup values, not a forecast.
    pub temperature_band: &'static str,
    pub humidity: &'static str,
    pub monthly_rainfall: &'static str,

    pub historical_note: &'static str,

    /// One-line preparedness warning for the window.
    pub warning: &'static str,
}

/// Resolve the hurricane-season window containing `date`.
///
/// The windows cover every day of the year, February 29 included; if no
/// window matched, the Dry Season applies as a fallback. Total for any
/// syntactically valid date and never panics.
pub fn resolve_season(date: NaiveDate) -> SeasonDescriptor {
    let index = SEASON_WINDOWS
        .iter()
        .position(|window| window.contains(date.month(), date.day()))
        .unwrap_or(DRY_SEASON);

    let window = &SEASON_WINDOWS[index];
    let next = &SEASON_WINDOWS[(index + 1) % SEASON_WINDOWS.len()];

    // One day past the window's end is the next window's first day,
    // crossing the year boundary where the calendar does.
    let next_start = window.end_date_for(date) + chrono::Days::new(1);
    let days_until_next_season = (next_start - date).num_days();

    SeasonDescriptor {
        name: window.name,
        risk_level: window.risk_level,
        risk_tier: RiskTier::from_risk_level(window.risk_level),
        days_until_next_season,
        next_season_name: next.name,
        temperature_band: window.temperature_band,
        humidity: window.humidity,
        monthly_rainfall: window.monthly_rainfall,
        historical_note: window.historical_note,
        warning: window.warning,
    }
}
