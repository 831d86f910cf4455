//! Backup export/import and bulk roster intake.
//!
//! # Responsibility
//! - Serialize the full roster state into the human-readable export payload.
//! - Parse the payload back (round-trip) and parse line-oriented bulk input.
//!
//! # Invariants
//! - The export payload mirrors the persisted representation: one object
//!   with `people` and `duties` arrays.
//! - Bulk lines split on any run of whitespace and/or commas; a line without
//!   a name yields nothing.

use crate::model::duty::Duty;
use crate::model::person::Person;
use crate::store::{RosterSnapshot, StoreResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static BULK_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("bulk delimiter pattern is valid"));

/// One parsed line of bulk intake text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    pub name: String,
    pub unit: String,
    pub group: String,
}

/// Serializes the full roster as pretty-printed JSON.
pub fn export_state(people: &[Person], duties: &[Duty]) -> StoreResult<String> {
    let snapshot = RosterSnapshot {
        people: people.to_vec(),
        duties: duties.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Suggested download name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("rollcall_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Parses an export payload back into a roster snapshot.
pub fn import_state(payload: &str) -> StoreResult<RosterSnapshot> {
    Ok(serde_json::from_str(payload)?)
}

/// Parses line-oriented bulk text into `name, unit, group` entries.
///
/// Fields beyond the third are ignored; missing unit/group stay empty and
/// pick up their sentinels when the person is constructed.
pub fn parse_bulk_lines(text: &str) -> Vec<BulkEntry> {
    text.lines()
        .filter_map(|line| {
            // Fields are positional: a leading delimiter means a blank name
            // and the whole line is skipped.
            let mut fields = BULK_DELIMITER.split(line.trim());
            let name = fields.next().unwrap_or("");
            if name.is_empty() {
                return None;
            }
            Some(BulkEntry {
                name: name.to_string(),
                unit: fields.next().unwrap_or("").to_string(),
                group: fields.next().unwrap_or("").to_string(),
            })
        })
        .collect()
}
