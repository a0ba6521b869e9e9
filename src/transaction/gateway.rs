//! The single entry point for reading and writing transactions.
//!
//! When a remote endpoint is configured it is the primary data source and
//! the local store is only a read fallback. Reads never fail: any remote
//! error falls back to the local list. Writes never fall back: a
//! failed remote write is reported as `false` so the caller can tell the user.

use std::{sync::Arc, time::Duration};

use reqwest::Url;

use crate::{
    snapshot_store::SnapshotStore,
    transaction::{
        LocalTransactions, RemoteEndpoint, Transaction, TransactionFields, TransactionId,
        TransactionPatch,
    },
};

/// Where the transactions returned by [TransactionGateway::list_with_source]
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// No endpoint is configured, so the local store is the source of truth.
    Local,
    /// The endpoint answered.
    Remote,
    /// The endpoint failed and the local store was read instead.
    LocalFallback,
}

/// The result of listing transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub transactions: Vec<Transaction>,
    pub source: ListSource,
}

/// Settings for the remote endpoint.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// The endpoint URL. `None` selects local mode.
    pub endpoint_url: Option<Url>,
    /// How long a single request may take before it counts as a network failure.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Reads and writes transactions through the endpoint or the local store.
#[derive(Clone)]
pub struct TransactionGateway {
    local: LocalTransactions,
    remote: Option<RemoteEndpoint>,
}

impl TransactionGateway {
    pub fn new(store: Arc<dyn SnapshotStore>, config: GatewayConfig) -> Self {
        let remote = config
            .endpoint_url
            .map(|url| RemoteEndpoint::new(url, config.request_timeout));

        match &remote {
            Some(remote) => tracing::info!("Using remote endpoint {}", remote.url()),
            None => tracing::info!("No remote endpoint configured, using the local store"),
        }

        Self {
            local: LocalTransactions::new(store),
            remote,
        }
    }

    /// Every transaction. Never fails, see [TransactionGateway::list_with_source].
    pub async fn list(&self) -> Vec<Transaction> {
        self.list_with_source().await.transactions
    }

    /// Every transaction, along with where they came from.
    ///
    /// Remote failures are logged and answered with the local list. A local
    /// list that cannot be read is logged and answered with an empty list.
    pub async fn list_with_source(&self) -> Listing {
        let Some(remote) = &self.remote else {
            return Listing {
                transactions: self.list_local(),
                source: ListSource::Local,
            };
        };

        match remote.read().await {
            Ok(transactions) => Listing {
                transactions,
                source: ListSource::Remote,
            },
            Err(error) => {
                tracing::warn!("Could not read transactions from {}: {error}", remote.url());
                Listing {
                    transactions: self.list_local(),
                    source: ListSource::LocalFallback,
                }
            }
        }
    }

    /// Record a new transaction with a fresh ID and timestamp.
    ///
    /// Returns whether the transaction was stored.
    pub async fn create(&self, fields: TransactionFields) -> bool {
        let transaction = Transaction::create(fields);

        let result = match &self.remote {
            None => self.local.append(transaction).map_err(|error| error.to_string()),
            Some(remote) => remote
                .create(&transaction)
                .await
                .map_err(|error| error.to_string()),
        };

        report_write("create", result)
    }

    /// Change the fields in `patch` on the transaction with `id`.
    ///
    /// In local mode a missing ID is not an error. Returns whether the update
    /// was accepted.
    pub async fn update(&self, id: &TransactionId, patch: TransactionPatch) -> bool {
        let result = match &self.remote {
            None => self.local.update(id, patch).map_err(|error| error.to_string()),
            Some(remote) => remote
                .update(id, &patch)
                .await
                .map_err(|error| error.to_string()),
        };

        report_write("update", result)
    }

    /// Delete the transaction with `id`.
    ///
    /// In local mode a missing ID is not an error. Returns whether the delete
    /// was accepted.
    pub async fn delete(&self, id: &TransactionId) -> bool {
        let result = match &self.remote {
            None => self.local.delete(id).map_err(|error| error.to_string()),
            Some(remote) => remote.delete(id).await.map_err(|error| error.to_string()),
        };

        report_write("delete", result)
    }

    fn list_local(&self) -> Vec<Transaction> {
        self.local.list().unwrap_or_else(|error| {
            tracing::error!("Could not read local transactions: {error}");
            Vec::new()
        })
    }
}

fn report_write(operation: &str, result: Result<(), String>) -> bool {
    match result {
        Ok(()) => {
            tracing::info!("Transaction {operation} succeeded");
            true
        }
        Err(error) => {
            tracing::error!("Transaction {operation} failed: {error}");
            false
        }
    }
}
