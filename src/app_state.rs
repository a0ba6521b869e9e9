//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    budget::BudgetBook,
    db::initialize,
    snapshot_store::{SnapshotStore, SqliteSnapshotStore},
    transaction::{GatewayConfig, TransactionGateway},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,

    /// Reads and writes transactions through the endpoint or the local store.
    pub gateway: Arc<TransactionGateway>,

    /// The monthly budgets, always kept in the local store.
    pub budgets: BudgetBook,
}

impl AppState {
    /// Create a new [AppState] backed by a SQLite database connection.
    ///
    /// This function will initialize the database by adding the snapshot table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Taipei".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        gateway_config: GatewayConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let store: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshotStore::new(connection));

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            gateway: Arc::new(TransactionGateway::new(store.clone(), gateway_config)),
            budgets: BudgetBook::new(store),
        })
    }
}

/// The state needed to read or write transactions.
#[derive(Clone)]
pub struct TransactionState {
    pub gateway: Arc<TransactionGateway>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed to read transactions and budgets together.
#[derive(Clone)]
pub struct LedgerState {
    pub gateway: Arc<TransactionGateway>,
    pub budgets: BudgetBook,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
            budgets: state.budgets.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed to read and change budgets.
#[derive(Clone)]
pub struct BudgetState {
    pub budgets: BudgetBook,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Taipei".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budgets: state.budgets.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
