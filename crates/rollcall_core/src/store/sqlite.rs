//! SQLite-backed roster store (local mode).
//!
//! # Responsibility
//! - Persist people and duties to the migrated local database.
//! - Own the duty-deletion cascade that clears matching assignment entries.
//!
//! # Invariants
//! - `assignments` round-trips through one JSON text column per person.
//! - `delete_duty` removes the duty row and clears every assignment entry
//!   pointing at it, across all people and sessions, in one transaction.

use crate::model::duty::{Duty, DutyId};
use crate::model::person::{Person, PersonId};
use crate::store::{BackendKind, RosterSnapshot, RosterStore, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use uuid::Uuid;

const PERSON_SELECT_SQL: &str =
    "SELECT uuid, name, unit, grp, assignments, created_at FROM people";

/// Local roster backend over a migrated SQLite connection.
pub struct SqliteRosterStore {
    conn: Connection,
}

impl SqliteRosterStore {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl RosterStore for SqliteRosterStore {
    fn backend_kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn load(&self) -> StoreResult<RosterSnapshot> {
        let mut people = Vec::new();
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        let mut duties = Vec::new();
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, created_at FROM duties ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            duties.push(parse_duty_row(row)?);
        }

        Ok(RosterSnapshot { people, duties })
    }

    fn insert_person(&mut self, person: &Person) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO people (uuid, name, unit, grp, assignments, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                person.id.to_string(),
                person.name.as_str(),
                person.unit.as_str(),
                person.group.as_str(),
                serde_json::to_string(&person.assignments)?,
                person.created_at,
            ],
        )?;
        Ok(())
    }

    fn update_person(&mut self, person: &Person) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE people
             SET name = ?1, unit = ?2, grp = ?3, assignments = ?4
             WHERE uuid = ?5;",
            params![
                person.name.as_str(),
                person.unit.as_str(),
                person.group.as_str(),
                serde_json::to_string(&person.assignments)?,
                person.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(person.id));
        }
        Ok(())
    }

    fn delete_person(&mut self, id: PersonId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM people WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn insert_duty(&mut self, duty: &Duty) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO duties (uuid, name, created_at) VALUES (?1, ?2, ?3);",
            params![duty.id.to_string(), duty.name.as_str(), duty.created_at],
        )?;
        Ok(())
    }

    fn delete_duty(&mut self, id: DutyId) -> StoreResult<usize> {
        let tx = self.conn.transaction()?;

        let changed = tx.execute("DELETE FROM duties WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        // Cascade: rewrite the assignments column of every person that still
        // references the deleted duty in any session.
        let mut cleared = 0;
        let mut rewrites: Vec<(String, String)> = Vec::new();
        {
            let mut stmt = tx.prepare(
                "SELECT uuid, assignments FROM people WHERE assignments LIKE ?1;",
            )?;
            let needle = format!("%{id}%");
            let mut rows = stmt.query([needle])?;
            while let Some(row) = rows.next()? {
                let uuid_text: String = row.get(0)?;
                let assignments_json: String = row.get(1)?;
                let mut assignments = parse_assignments(&assignments_json, &uuid_text)?;
                let before = assignments.len();
                assignments.retain(|_, assigned| *assigned != id);
                if assignments.len() < before {
                    cleared += before - assignments.len();
                    rewrites.push((uuid_text, serde_json::to_string(&assignments)?));
                }
            }
        }
        for (uuid_text, assignments_json) in rewrites {
            tx.execute(
                "UPDATE people SET assignments = ?1 WHERE uuid = ?2;",
                params![assignments_json, uuid_text],
            )?;
        }

        tx.commit()?;
        Ok(cleared)
    }

    fn replace_all(&mut self, snapshot: &RosterSnapshot) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM people;", [])?;
        tx.execute("DELETE FROM duties;", [])?;
        for person in &snapshot.people {
            tx.execute(
                "INSERT INTO people (uuid, name, unit, grp, assignments, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    person.id.to_string(),
                    person.name.as_str(),
                    person.unit.as_str(),
                    person.group.as_str(),
                    serde_json::to_string(&person.assignments)?,
                    person.created_at,
                ],
            )?;
        }
        for duty in &snapshot.duties {
            tx.execute(
                "INSERT INTO duties (uuid, name, created_at) VALUES (?1, ?2, ?3);",
                params![duty.id.to_string(), duty.name.as_str(), duty.created_at],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> StoreResult<Person> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "people.uuid")?;
    let assignments_json: String = row.get("assignments")?;
    let assignments = parse_assignments(&assignments_json, &uuid_text)?;

    Ok(Person {
        id,
        name: row.get("name")?,
        unit: row.get("unit")?,
        group: row.get("grp")?,
        assignments,
        created_at: row.get("created_at")?,
    })
}

fn parse_duty_row(row: &Row<'_>) -> StoreResult<Duty> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Duty {
        id: parse_uuid(&uuid_text, "duties.uuid")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_assignments(json: &str, owner: &str) -> StoreResult<BTreeMap<String, DutyId>> {
    serde_json::from_str(json).map_err(|err| {
        StoreError::InvalidData(format!(
            "invalid assignments payload for person `{owner}`: {err}"
        ))
    })
}
