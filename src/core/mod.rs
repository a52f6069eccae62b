//! Core business logic - framework-agnostic activity, update and reporting operations.
//!
//! Store-facing functions take the connection explicitly. `aggregate`, `export`
//! and the pure half of `report` never touch the database.

/// Activity creation and lookup
pub mod activity;
/// Grouping updates per activity and deriving current status
pub mod aggregate;
/// Dashboard summary and activity overview
pub mod dashboard;
/// CSV serialization of reports
pub mod export;
/// Registered profiles and caller identity
pub mod profile;
/// Date-range reports and the daily view
pub mod report;
/// In-flight submission tracking
pub mod submission;
/// Recording and querying activity updates
pub mod update;
