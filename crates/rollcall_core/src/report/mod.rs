//! Roster report aggregation.
//!
//! # Responsibility
//! - Group people by unit or group label and tally per-session duty counts.
//! - Produce the tabular shape and the copy-pasteable text blocks.
//!
//! # Invariants
//! - Aggregation is a pure function of `(people, duties, session, mode)`;
//!   every invocation recomputes from scratch, there is no incremental path.
//! - Empty inputs yield zero counts and an empty group list, never an error.
//! - A dangling duty id classifies under the unknown-duty label, never panics.

mod aggregate;
mod text;

pub use aggregate::{aggregate, DutyTally, GroupReport, Report, ReportMode};
pub use text::render_text;

/// Label of the global summary block appended after all per-group blocks.
pub const TOTAL_KEY: &str = "總計";

/// Fixed priority order for unit-mode report keys.
///
/// Units not listed here sort after these, by first character code point.
pub const UNIT_PRIORITY: &[&str] = &["隊部", crate::model::DEFAULT_UNIT];

/// Fixed priority order for group-mode report keys.
pub const GROUP_PRIORITY: &[&str] = &[crate::model::DEFAULT_GROUP];
