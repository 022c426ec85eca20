//! The pure computation core.
//!
//! Every function in this module tree is synchronous, side-effect-free, and
//! deterministic given its inputs: callers supply snapshots and a reference
//! time, and get derived values back. Nothing here touches the network, the
//! database, or the clock, so the engine is safe to call concurrently from
//! any number of handlers without coordination.
//!
//! - [`scoring`]: 0-100 portfolio health score from issue counts and
//!   inspection recency
//! - [`streak`]: days since the last critical finding, with milestones
//! - [`season`]: Florida hurricane-season risk calendar

pub mod scoring;
pub mod season;
pub mod streak;

pub use scoring::{WeightProfile, compute_health_score};
pub use season::{SeasonDescriptor, resolve_season};
pub use streak::{StreakResult, compute_streak};
