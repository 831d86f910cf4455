//! Domain model for the roll-call roster.
//!
//! # Responsibility
//! - Define the canonical `Person` and `Duty` records shared by all layers.
//! - Own label normalization for unit/group sentinels.
//!
//! # Invariants
//! - Every record is identified by a stable UUID, never reused.
//! - In local-store mode a person's `assignments` never references a duty id
//!   that is absent from the duty collection (reconciled on duty deletion).

pub mod duty;
pub mod person;

/// Unit label substituted when a person's unit is blank.
pub const DEFAULT_UNIT: &str = "預設建置班";

/// Group label substituted when a person's group is blank.
pub const DEFAULT_GROUP: &str = "未分組";

/// Display label for a duty id that no longer resolves to a duty.
pub const UNKNOWN_DUTY: &str = "未知";

/// Normalizes a raw label: trimmed, with the given sentinel for blank input.
pub(crate) fn normalize_label(raw: &str, sentinel: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        sentinel.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn epoch_ms_now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
