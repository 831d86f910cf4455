//! In-memory document store standing in for the remote mirror.
//!
//! The real remote backend is a managed document database reached over the
//! network; its subscription/transport plumbing is out of scope here, so this
//! implementation models the semantics the service layer can observe:
//!
//! - Snapshot-replace writes, last write wins.
//! - A person created before the remote connection existed cannot be updated
//!   remotely: updating an id this store has never seen is a logged no-op.
//!   Such records need a manual export/import cycle, this is accepted.
//! - Duty deletion does not cascade-clear assignment references. Dangling ids
//!   render as the unknown-duty label at read time instead.

use crate::model::duty::{Duty, DutyId};
use crate::model::person::{Person, PersonId};
use crate::store::{BackendKind, RosterSnapshot, RosterStore, StoreResult};
use log::warn;
use std::collections::BTreeMap;

/// Remote-mirror roster backend.
#[derive(Default)]
pub struct MemoryRosterStore {
    people: BTreeMap<PersonId, Person>,
    duties: BTreeMap<DutyId, Duty>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for MemoryRosterStore {
    fn backend_kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn load(&self) -> StoreResult<RosterSnapshot> {
        let mut people: Vec<Person> = self.people.values().cloned().collect();
        let mut duties: Vec<Duty> = self.duties.values().cloned().collect();
        people.sort_by_key(|person| (person.created_at, person.id));
        duties.sort_by_key(|duty| (duty.created_at, duty.id));
        Ok(RosterSnapshot { people, duties })
    }

    fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        self.people.insert(person.id, person.clone());
        Ok(())
    }

    fn update_person(&mut self, person: &Person) -> StoreResult<()> {
        if !self.people.contains_key(&person.id) {
            warn!(
                "event=remote_update_skipped module=store person_id={} reason=created_before_sync",
                person.id
            );
            return Ok(());
        }
        self.people.insert(person.id, person.clone());
        Ok(())
    }

    fn delete_person(&mut self, id: PersonId) -> StoreResult<()> {
        self.people.remove(&id);
        Ok(())
    }

    fn insert_duty(&mut self, duty: &Duty) -> StoreResult<()> {
        self.duties.insert(duty.id, duty.clone());
        Ok(())
    }

    fn delete_duty(&mut self, id: DutyId) -> StoreResult<usize> {
        self.duties.remove(&id);
        // No cascade on the remote path; see module docs.
        Ok(0)
    }

    fn replace_all(&mut self, snapshot: &RosterSnapshot) -> StoreResult<()> {
        self.people = snapshot
            .people
            .iter()
            .map(|person| (person.id, person.clone()))
            .collect();
        self.duties = snapshot
            .duties
            .iter()
            .map(|duty| (duty.id, duty.clone()))
            .collect();
        Ok(())
    }
}
