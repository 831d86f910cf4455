//! Core domain logic for the roll-call roster tracker.
//! This crate is the single source of truth for roster invariants.

pub mod db;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod order;
pub mod report;
pub mod service;
pub mod store;

pub use exchange::{export_file_name, export_state, import_state, parse_bulk_lines, BulkEntry};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::duty::{Duty, DutyId};
pub use model::person::{Person, PersonId};
pub use model::{DEFAULT_GROUP, DEFAULT_UNIT, UNKNOWN_DUTY};
pub use order::priority_cmp;
pub use report::{aggregate, render_text, DutyTally, GroupReport, Report, ReportMode};
pub use service::roster_service::RosterService;
pub use store::{
    BackendKind, MemoryRosterStore, RosterSnapshot, RosterStore, SqliteRosterStore, StoreError,
    StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
