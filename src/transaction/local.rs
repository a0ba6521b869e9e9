//! Transactions kept in the device-local store.
//!
//! The whole list lives under one snapshot key and is rewritten in full on
//! every change.

use std::sync::Arc;

use crate::{
    Error,
    snapshot_store::{SnapshotStore, TRANSACTIONS_KEY},
    transaction::{Transaction, TransactionId, TransactionPatch},
};

/// The locally stored transaction list.
#[derive(Clone)]
pub struct LocalTransactions {
    store: Arc<dyn SnapshotStore>,
}

impl LocalTransactions {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Every stored transaction in insertion order, or an empty list if none
    /// have been stored.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the snapshot is not a
    /// valid transaction list.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        parse_snapshot(self.store.load(TRANSACTIONS_KEY)?)
    }

    /// Add `transaction` to the end of the list.
    pub fn append(&self, transaction: Transaction) -> Result<(), Error> {
        self.modify(|transactions| transactions.push(transaction.clone()))
    }

    /// Merge `patch` into the transaction with `id`.
    ///
    /// Nothing changes if no transaction has that ID.
    pub fn update(&self, id: &TransactionId, patch: TransactionPatch) -> Result<(), Error> {
        self.modify(
            |transactions| match transactions.iter_mut().find(|transaction| &transaction.id == id) {
                Some(transaction) => transaction.apply(patch.clone()),
                None => tracing::debug!("no local transaction with ID {id} to update"),
            },
        )
    }

    /// Remove the transaction with `id`, if there is one.
    pub fn delete(&self, id: &TransactionId) -> Result<(), Error> {
        self.modify(|transactions| transactions.retain(|transaction| &transaction.id != id))
    }

    /// Read, change and rewrite the list while holding the store's lock.
    fn modify(&self, mut change: impl FnMut(&mut Vec<Transaction>)) -> Result<(), Error> {
        self.store.update(TRANSACTIONS_KEY, &mut |snapshot| {
            let mut transactions = parse_snapshot(snapshot)?;
            change(&mut transactions);

            serde_json::to_string(&transactions)
                .map_err(|error| Error::JSONSerializationError(error.to_string()))
        })
    }
}

fn parse_snapshot(snapshot: Option<String>) -> Result<Vec<Transaction>, Error> {
    match snapshot {
        Some(snapshot) => serde_json::from_str(&snapshot)
            .map_err(|error| Error::JSONSerializationError(error.to_string())),
        None => Ok(Vec::new()),
    }
}
