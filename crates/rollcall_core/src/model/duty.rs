//! Duty category model.

use crate::model::epoch_ms_now;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a duty category.
pub type DutyId = Uuid;

/// A named duty category a person can be assigned to for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    pub id: DutyId,
    pub name: String,
    /// Creation timestamp in epoch milliseconds. Serialized as `createdAt`
    /// to match the persisted representation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Duty {
    /// Creates a duty with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a duty with a caller-provided stable ID (import paths).
    pub fn with_id(id: DutyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            created_at: epoch_ms_now(),
        }
    }
}
