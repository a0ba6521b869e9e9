//! A household ledger for two people, 朱 and 羅.
//!
//! The library serves a mobile-styled web app that records expenses and
//! income, shows the net figure and spending of a selected month, and tracks
//! each person's monthly budget.
//!
//! Transactions are read from and written to a spreadsheet-backed HTTP
//! endpoint when one is configured, and to a local SQLite store otherwise.
//! Budgets always live in the local store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod breakdown;
mod budget;
mod budget_settings;
mod category;
mod db;
mod endpoints;
mod error;
mod export;
mod html;
mod ledger;
mod ledger_page;
mod logging;
mod month;
mod navigation;
mod not_found;
mod routing;
mod snapshot_store;
mod tag;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use snapshot_store::{MONTHLY_BUDGETS_KEY, TRANSACTIONS_KEY};
pub use transaction::GatewayConfig;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
