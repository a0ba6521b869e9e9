//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error, app_state::TransactionState, endpoints, month::MonthKey,
    transaction::form::TransactionForm,
};

/// A route handler for creating a new transaction, redirects to the ledger for
/// the transaction's month on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let fields = match form.into_fields() {
        Ok(fields) => fields,
        Err(error) => {
            tracing::warn!("Rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let month = MonthKey::of(fields.date);

    if !state.gateway.create(fields).await {
        return Error::WriteFailed.into_alert_response();
    }

    (
        HxRedirect(endpoints::with_month(endpoints::ROOT, month)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        extract::{FromRef, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use reqwest::Url;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        AppState,
        app_state::TransactionState,
        test_utils::{assert_hx_redirect, get_test_app_state, parse_html_fragment},
        transaction::{GatewayConfig, create_transaction_endpoint, form::TransactionForm},
    };

    fn lunch_form() -> TransactionForm {
        TransactionForm {
            date: Some("2024-03-05".to_owned()),
            time: Some("12:30".to_owned()),
            amount: Some("500".to_owned()),
            description: Some("午餐".to_owned()),
            main_category: Some("食".to_owned()),
            sub_category: Some("三餐外食".to_owned()),
            tags: vec!["朱".to_owned()],
            custom_tags: None,
        }
    }

    async fn alert_message(response: axum::response::Response) -> String {
        let fragment = parse_html_fragment(response).await;
        let selector = Selector::parse("[role=alert] p").unwrap();
        fragment
            .select(&selector)
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = TransactionState::from_ref(&get_test_app_state());

        let response = create_transaction_endpoint(State(state.clone()), Form(lunch_form())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/?month=2024-03");
        let transactions = state.gateway.list().await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].fields.amount, 500.0);
        assert_eq!(transactions[0].fields.description, "午餐");
        assert!(transactions[0].fields.tags.contains("朱"));
    }

    #[tokio::test]
    async fn missing_amount_is_rejected_before_saving() {
        let state = TransactionState::from_ref(&get_test_app_state());
        let form = TransactionForm {
            amount: None,
            ..lunch_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(alert_message(response).await, "請填寫金額與分類");
        assert!(state.gateway.list().await.is_empty());
    }

    #[tokio::test]
    async fn failed_write_is_bad_gateway() {
        // Nothing listens on port 9 of the loopback interface.
        let app_state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Etc/UTC",
            GatewayConfig {
                endpoint_url: Some(Url::parse("http://127.0.0.1:9/exec").unwrap()),
                request_timeout: Duration::from_secs(2),
            },
        )
        .unwrap();
        let state = TransactionState::from_ref(&app_state);

        let response = create_transaction_endpoint(State(state), Form(lunch_form())).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(alert_message(response).await, "儲存失敗，請檢查 API 設定");
    }
}
