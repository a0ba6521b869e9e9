//! The device-local store: whole JSON snapshots saved under a key.
//!
//! Nothing is ever updated incrementally. Callers read the full snapshot,
//! change it in memory, and write the full snapshot back. Writers that depend
//! on the current snapshot go through [SnapshotStore::update] so that
//! concurrent changes cannot overwrite each other.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Key of the JSON array holding every locally stored transaction.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key of the JSON object mapping months to budgets.
pub const MONTHLY_BUDGETS_KEY: &str = "monthly_budgets";

/// Reads and writes full snapshots by key.
pub trait SnapshotStore: Send + Sync {
    /// Get the snapshot saved under `key`, or `None` if nothing has been saved.
    fn load(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the snapshot saved under `key`.
    fn save(&self, key: &str, snapshot: &str) -> Result<(), Error>;

    /// Replace the snapshot saved under `key` with the result of `change`,
    /// which is given the current snapshot.
    ///
    /// No other load or save can run between reading the current snapshot and
    /// saving the new one. Nothing is saved if `change` returns an error.
    fn update(
        &self,
        key: &str,
        change: &mut dyn FnMut(Option<String>) -> Result<String, Error>,
    ) -> Result<(), Error>;
}

/// A [SnapshotStore] backed by a single SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// Wrap a connection whose schema has been set up with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SqliteSnapshotStore {
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, Error> {
        load_snapshot(&*self.lock()?, key)
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), Error> {
        save_snapshot(&*self.lock()?, key, snapshot)
    }

    fn update(
        &self,
        key: &str,
        change: &mut dyn FnMut(Option<String>) -> Result<String, Error>,
    ) -> Result<(), Error> {
        let connection = self.lock()?;
        let current = load_snapshot(&connection, key)?;
        let snapshot = change(current)?;

        save_snapshot(&connection, key, &snapshot)
    }
}

fn load_snapshot(connection: &Connection, key: &str) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM snapshot WHERE key = :key",
            &[(":key", &key)],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
}

fn save_snapshot(connection: &Connection, key: &str, snapshot: &str) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO snapshot (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, snapshot),
    )?;

    Ok(())
}

/// Create the snapshot table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_snapshot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS snapshot (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
