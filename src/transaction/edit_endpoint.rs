//! Defines the endpoint for replacing the fields of a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::TransactionState,
    endpoints,
    month::MonthKey,
    transaction::{TransactionId, TransactionPatch, form::TransactionForm},
};

/// A route handler for updating every field of a transaction through the
/// edit form, redirects to the ledger for the new month on success.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(error) => {
            tracing::warn!("Rejected edit of transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    let month = MonthKey::of(fields.date);
    let id = TransactionId::new(&transaction_id);

    if !state.gateway.update(&id, TransactionPatch::from(fields)).await {
        return Error::WriteFailed.into_alert_response();
    }

    (
        HxRedirect(endpoints::with_month(endpoints::ROOT, month)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
