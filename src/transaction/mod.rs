//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its creation fields and partial updates
//! - The gateway that reads and writes transactions through the remote
//!   endpoint or the local store
//! - The form and route handlers for creating, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod form_page;
mod gateway;
mod local;
mod remote;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{Transaction, TransactionFields, TransactionId, TransactionPatch};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use form::get_sub_category_picker;
pub use form_page::{get_edit_transaction_page, get_new_transaction_page};
pub use gateway::{GatewayConfig, ListSource, TransactionGateway};
pub use local::LocalTransactions;
pub use remote::RemoteEndpoint;
