//! Roster use-case service.
//!
//! # Responsibility
//! - Own the in-memory roster state and drive the selected backend.
//! - Provide the assignment engine and the roll-call board queries.
//!
//! # Invariants
//! - All mutations are optimistic: in-memory state changes first, then the
//!   backend write runs; a failed write is logged, never rolled back.
//! - Only the add-person path surfaces a backend failure to the caller;
//!   every other write failure is logged and swallowed.
//! - Validation failures (blank required fields) are silent no-ops.

use crate::exchange::{self, BulkEntry};
use crate::model::duty::{Duty, DutyId};
use crate::model::person::{Person, PersonId};
use crate::model::UNKNOWN_DUTY;
use crate::store::{BackendKind, RosterSnapshot, RosterStore, StoreResult};
use log::{debug, error, info};

/// Duty categories seeded on a completely fresh roster.
const DEFAULT_DUTIES: &[&str] = &["公差", "休假", "衛哨"];

/// Use-case service owning the roster collections and one backend.
pub struct RosterService<S: RosterStore> {
    store: S,
    people: Vec<Person>,
    duties: Vec<Duty>,
}

impl<S: RosterStore> RosterService<S> {
    /// Loads the full roster from `store` and takes ownership of it.
    pub fn load(store: S) -> StoreResult<Self> {
        let snapshot = store.load()?;
        info!(
            "event=roster_load module=service status=ok backend={} people={} duties={}",
            store.backend_kind(),
            snapshot.people.len(),
            snapshot.duties.len()
        );
        Ok(Self {
            store,
            people: snapshot.people,
            duties: snapshot.duties,
        })
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.store.backend_kind()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    /// Resolves a duty id to its display name; dangling ids read as the
    /// unknown-duty label instead of erroring.
    pub fn duty_name(&self, id: DutyId) -> &str {
        self.duties
            .iter()
            .find(|duty| duty.id == id)
            .map(|duty| duty.name.as_str())
            .unwrap_or(UNKNOWN_DUTY)
    }

    /// Seeds the default duty categories when the collection is empty.
    ///
    /// First-run convenience; a roster that had all duties deleted on purpose
    /// is indistinguishable from a fresh one and is reseeded too.
    pub fn seed_default_duties(&mut self) {
        if !self.duties.is_empty() {
            return;
        }
        for name in DEFAULT_DUTIES {
            self.add_duty(name);
        }
    }

    /// Adds a person to the roster.
    ///
    /// A blank name is silently skipped (`Ok(None)`). This is the one write
    /// path whose backend failure is returned to the caller so the UI can
    /// show a blocking notification.
    pub fn add_person(
        &mut self,
        name: &str,
        unit: &str,
        group: &str,
    ) -> StoreResult<Option<PersonId>> {
        if name.trim().is_empty() {
            debug!("event=add_person module=service status=skipped reason=blank_name");
            return Ok(None);
        }

        let person = Person::new(name, unit, group);
        let id = person.id;
        let persisted = self.store.insert_person(&person);
        // The person stays in memory even when the write failed; persistence
        // is optimistic and never rolled back.
        self.people.push(person);

        if let Err(err) = persisted {
            error!("event=add_person module=service status=error person_id={id} error={err}");
            return Err(err);
        }
        Ok(Some(id))
    }

    /// Adds a duty category; blank names are skipped, write failures logged.
    pub fn add_duty(&mut self, name: &str) -> Option<DutyId> {
        if name.trim().is_empty() {
            debug!("event=add_duty module=service status=skipped reason=blank_name");
            return None;
        }

        let duty = Duty::new(name);
        let id = duty.id;
        if let Err(err) = self.store.insert_duty(&duty) {
            error!("event=add_duty module=service status=error duty_id={id} error={err}");
        }
        self.duties.push(duty);
        Some(id)
    }

    /// Removes a person permanently. Returns whether the roster changed.
    pub fn delete_person(&mut self, id: PersonId) -> bool {
        let before = self.people.len();
        self.people.retain(|person| person.id != id);
        if self.people.len() == before {
            return false;
        }

        if let Err(err) = self.store.delete_person(id) {
            error!("event=delete_person module=service status=error person_id={id} error={err}");
        }
        true
    }

    /// Removes a duty category and clears every in-memory assignment entry
    /// pointing at it, across all people and sessions.
    ///
    /// Returns the number of cleared assignment entries. The backend cascade
    /// only happens in local mode; the remote backend leaves persisted
    /// references dangling and they resolve to the unknown-duty label.
    pub fn delete_duty(&mut self, id: DutyId) -> usize {
        let before = self.duties.len();
        self.duties.retain(|duty| duty.id != id);
        if self.duties.len() == before {
            return 0;
        }

        let mut cleared = 0;
        for person in &mut self.people {
            cleared += person.clear_duty(id);
        }

        match self.store.delete_duty(id) {
            Ok(persisted) => {
                info!(
                    "event=delete_duty module=service status=ok duty_id={id} cleared={cleared} persisted_cleared={persisted}"
                );
            }
            Err(err) => {
                error!("event=delete_duty module=service status=error duty_id={id} error={err}");
            }
        }

        // The local backend rewrote the rows inside its cascade transaction.
        // The remote backend deliberately skips that cleanup; its dangling
        // references resolve to the unknown-duty label at read time.
        cleared
    }

    /// Writes a person's duty slot for one session.
    ///
    /// No-ops (returning `false`) when the person is unknown, the duty id is
    /// not in the duty collection, the session label is blank, or the new
    /// value equals the current one. A true no-op performs no persistence.
    pub fn set_assignment(
        &mut self,
        person_id: PersonId,
        session: &str,
        duty: Option<DutyId>,
    ) -> bool {
        let session = session.trim();
        if session.is_empty() {
            debug!("event=set_assignment module=service status=skipped reason=blank_session");
            return false;
        }
        if let Some(duty_id) = duty {
            if !self.duties.iter().any(|known| known.id == duty_id) {
                debug!(
                    "event=set_assignment module=service status=skipped duty_id={duty_id} reason=unknown_duty"
                );
                return false;
            }
        }

        let Some(person) = self.people.iter_mut().find(|person| person.id == person_id) else {
            debug!(
                "event=set_assignment module=service status=skipped person_id={person_id} reason=unknown_person"
            );
            return false;
        };

        if person.assignment(session) == duty {
            return false;
        }

        person.set_assignment(session, duty);
        self.persist_person(person_id);
        true
    }

    /// Clears both collections and the backend.
    pub fn reset(&mut self) {
        self.people.clear();
        self.duties.clear();
        if let Err(err) = self.store.replace_all(&RosterSnapshot::default()) {
            error!("event=reset module=service status=error error={err}");
        }
        info!("event=reset module=service status=ok");
    }

    /// People with no duty for `session`, optionally filtered by unit label.
    pub fn unassigned_people(&self, session: &str, unit_filter: Option<&str>) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|person| person.assignment(session).is_none())
            .filter(|person| unit_filter.map_or(true, |unit| person.unit == unit))
            .collect()
    }

    /// People assigned to `duty_id` for `session`, in roster order.
    pub fn people_on_duty(&self, session: &str, duty_id: DutyId) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|person| person.assignment(session) == Some(duty_id))
            .collect()
    }

    /// Distinct unit labels in roster order (filter dropdown source).
    pub fn units(&self) -> Vec<&str> {
        let mut units: Vec<&str> = Vec::new();
        for person in &self.people {
            if !units.contains(&person.unit.as_str()) {
                units.push(person.unit.as_str());
            }
        }
        units
    }

    /// Serializes the full roster state as the export payload.
    pub fn export_json(&self) -> StoreResult<String> {
        exchange::export_state(&self.people, &self.duties)
    }

    /// Restores roster state from an export payload, replacing everything.
    ///
    /// People receive fresh ids on import; duties keep theirs so existing
    /// assignment maps stay resolvable.
    pub fn import_backup(&mut self, payload: &str) -> StoreResult<()> {
        let snapshot = exchange::import_state(payload)?;
        self.duties = snapshot.duties;
        self.people = snapshot
            .people
            .into_iter()
            .map(|person| Person {
                id: uuid::Uuid::new_v4(),
                ..person
            })
            .collect();

        let snapshot = RosterSnapshot {
            people: self.people.clone(),
            duties: self.duties.clone(),
        };
        self.store.replace_all(&snapshot)?;
        info!(
            "event=import_backup module=service status=ok people={} duties={}",
            self.people.len(),
            self.duties.len()
        );
        Ok(())
    }

    /// Adds people from line-oriented bulk text. Returns how many were added.
    ///
    /// Lines with a blank name are skipped; backend failures follow the
    /// add-person surfacing rule but do not abort the remaining lines.
    pub fn import_bulk(&mut self, text: &str) -> usize {
        let mut added = 0;
        for BulkEntry { name, unit, group } in exchange::parse_bulk_lines(text) {
            match self.add_person(&name, &unit, &group) {
                Ok(Some(_)) => added += 1,
                Ok(None) => {}
                Err(err) => {
                    error!("event=import_bulk module=service status=error error={err}");
                }
            }
        }
        info!("event=import_bulk module=service status=ok added={added}");
        added
    }

    fn persist_person(&mut self, id: PersonId) {
        let Some(person) = self.people.iter().find(|person| person.id == id) else {
            return;
        };
        if let Err(err) = self.store.update_person(person) {
            error!("event=persist_person module=service status=error person_id={id} error={err}");
        }
    }
}
