//! Person domain model.
//!
//! # Responsibility
//! - Define the roster member record and its per-session assignment map.
//! - Provide lifecycle helpers for assignment reads/writes.
//!
//! # Invariants
//! - `id` is stable and never reused for another person.
//! - `assignments` holds one entry per session at most; the "unassigned"
//!   state is the absence of the session key, never a placeholder value.
//! - `unit` and `group` are stored normalized (trimmed, sentinel for blank).

use crate::model::duty::DutyId;
use crate::model::{epoch_ms_now, normalize_label, DEFAULT_GROUP, DEFAULT_UNIT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for a roster member.
pub type PersonId = Uuid;

/// Canonical roster member record.
///
/// `assignments` maps a free-form session name (e.g. a specific roll-call
/// event) to the duty assigned for that session. Session keys are not
/// enumerable and any non-empty string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable global ID used for persistence and assignment lookups.
    pub id: PersonId,
    pub name: String,
    /// Unit label. Blank input is replaced by [`DEFAULT_UNIT`].
    pub unit: String,
    /// Secondary grouping label. Blank input is replaced by [`DEFAULT_GROUP`].
    pub group: String,
    /// Session name -> assigned duty id. Missing key means unassigned.
    #[serde(default)]
    pub assignments: BTreeMap<String, DutyId>,
    /// Creation timestamp in epoch milliseconds. Serialized as `createdAt`
    /// to match the persisted representation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Person {
    /// Creates a person with a generated stable ID and normalized labels.
    pub fn new(name: impl Into<String>, unit: &str, group: &str) -> Self {
        Self::with_id(Uuid::new_v4(), name, unit, group)
    }

    /// Creates a person with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: PersonId, name: impl Into<String>, unit: &str, group: &str) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            unit: normalize_label(unit, DEFAULT_UNIT),
            group: normalize_label(group, DEFAULT_GROUP),
            assignments: BTreeMap::new(),
            created_at: epoch_ms_now(),
        }
    }

    /// Returns the duty assigned for `session`, if any.
    pub fn assignment(&self, session: &str) -> Option<DutyId> {
        self.assignments.get(session).copied()
    }

    /// Writes the assignment slot for `session`.
    ///
    /// `None` removes the entry so an unassigned session leaves no trace,
    /// equivalent to never having assigned.
    pub fn set_assignment(&mut self, session: &str, duty: Option<DutyId>) {
        match duty {
            Some(duty_id) => {
                self.assignments.insert(session.to_string(), duty_id);
            }
            None => {
                self.assignments.remove(session);
            }
        }
    }

    /// Removes every assignment entry pointing at `duty_id`, across all
    /// sessions. Returns the number of cleared entries.
    pub fn clear_duty(&mut self, duty_id: DutyId) -> usize {
        let before = self.assignments.len();
        self.assignments.retain(|_, assigned| *assigned != duty_id);
        before - self.assignments.len()
    }
}
