//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the local backend.
//! - Configure pragmas and run migrations before returning a connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    info!("event=db_open module=db status=start mode=file");
    let mut conn = Connection::open(path).map_err(|err| {
        error!("event=db_open module=db status=error mode=file error={err}");
        err
    })?;
    bootstrap_connection(&mut conn)?;
    info!("event=db_open module=db status=ok mode=file");
    Ok(conn)
}

/// Opens an in-memory SQLite database with migrations applied.
///
/// Used by tests and throwaway sessions; data does not survive the process.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    info!("event=db_open module=db status=ok mode=memory");
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn).map_err(|err| {
        error!("event=db_open module=db status=error error_code=db_bootstrap_failed error={err}");
        err
    })?;
    Ok(())
}
