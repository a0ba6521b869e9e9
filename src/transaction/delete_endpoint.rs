//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::TransactionState,
    endpoints,
    month::{MonthKey, MonthQuery},
    transaction::TransactionId,
};

/// A route handler for deleting a transaction.
///
/// Redirects to the ledger on success, keeping the month given in the query
/// if there is one.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let id = TransactionId::new(&transaction_id);

    if !state.gateway.delete(&id).await {
        return Error::WriteFailed.into_alert_response();
    }

    let redirect_url = query
        .month
        .and_then(|month| month.parse::<MonthKey>().ok())
        .map(|month| endpoints::with_month(endpoints::ROOT, month))
        .unwrap_or_else(|| endpoints::ROOT.to_owned());

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}
