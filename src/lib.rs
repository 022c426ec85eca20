//! Porchlight - portfolio health scoring and hurricane-season risk for
//! rental property inspections.
//!
//! # Overview
//!
//! Porchlight keeps the latest inspection snapshot for each property an
//! owner manages and derives three things from them: a 0-100 portfolio
//! health score, an issue-free streak with milestone classification, and a
//! Florida hurricane-season risk descriptor for any calendar date.
//!
//! The derivation lives in [`engine`] as pure functions over value inputs:
//! no I/O, no clock access, no shared state. Storage and HTTP are thin
//! layers that feed snapshots in and serve derived values out.
//!
//! # Modules
//!
//! - [`model`]: Domain value types, classifications, and API payloads
//! - [`engine`]: The pure computation core (scoring, streak, season)
//! - [`storage`]: SQLite snapshot store
//! - [`overview`]: Dashboard overview assembly and property alerts
//! - [`backend`]: Client for the external inspection-report backend
//! - [`api`]: HTTP API handlers

pub mod api;
pub mod backend;
pub mod engine;
pub mod model;
pub mod overview;
pub mod storage;
