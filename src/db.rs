/*! Sets up the SQLite database that backs the device-local store. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, snapshot_store::create_snapshot_table};

/// Create the tables for the local store if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_snapshot_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
