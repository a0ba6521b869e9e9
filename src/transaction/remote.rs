//! Client for the spreadsheet-backed HTTP endpoint.
//!
//! The endpoint exposes a single URL. Reads are `GET ?action=read` and return
//! a JSON array of transactions. Writes are `POST`s whose JSON body names the
//! action. A write succeeds iff the response status is a success; the body of
//! a write response is never inspected.

use std::time::Duration;

use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde::Serialize;

use crate::transaction::{Transaction, TransactionId, TransactionPatch};

/// The endpoint expects plain text so that browsers skip the CORS preflight.
const REQUEST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// The ways a single request to the endpoint can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RemoteError {
    /// The request could not be sent or the response could not be received.
    #[error("could not reach the endpoint: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status code.
    #[error("the endpoint responded with status {0}")]
    Status(u16),

    /// The response body was not a JSON array.
    #[error("the endpoint returned a malformed payload: {0}")]
    MalformedPayload(String),
}

/// The JSON body of a write request.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Command<'a> {
    Create(&'a Transaction),
    Update {
        id: &'a TransactionId,
        #[serde(flatten)]
        patch: &'a TransactionPatch,
    },
    Delete {
        id: &'a TransactionId,
    },
}

/// A configured spreadsheet endpoint.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    client: Client,
    url: Url,
}

impl RemoteEndpoint {
    /// Create a client for the endpoint at `url`.
    ///
    /// Every request is a single attempt that gives up after `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|error| {
                tracing::warn!("could not build HTTP client with timeout, using defaults: {error}");
                Client::new()
            });

        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch every transaction from the endpoint.
    pub async fn read(&self) -> Result<Vec<Transaction>, RemoteError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("action", "read")])
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;

        let rows: Vec<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|error| RemoteError::MalformedPayload(error.to_string()))?;

        // The spreadsheet is edited by hand, so one bad row must not hide the rest.
        let transactions = rows
            .into_iter()
            .filter_map(|row| {
                serde_json::from_value::<Transaction>(row)
                    .inspect_err(|error| {
                        tracing::warn!("Skipping invalid row from the endpoint: {error}")
                    })
                    .ok()
            })
            .collect();

        Ok(transactions)
    }

    pub async fn create(&self, transaction: &Transaction) -> Result<(), RemoteError> {
        self.submit(&Command::Create(transaction)).await
    }

    pub async fn update(
        &self,
        id: &TransactionId,
        patch: &TransactionPatch,
    ) -> Result<(), RemoteError> {
        self.submit(&Command::Update { id, patch }).await
    }

    pub async fn delete(&self, id: &TransactionId) -> Result<(), RemoteError> {
        self.submit(&Command::Delete { id }).await
    }

    async fn submit(&self, command: &Command<'_>) -> Result<(), RemoteError> {
        let body = serde_json::to_string(command)
            .map_err(|error| RemoteError::MalformedPayload(error.to_string()))?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, REQUEST_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|error| RemoteError::Network(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteError::Status(status.as_u16()))
        }
    }
}
