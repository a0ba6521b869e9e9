//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    breakdown::get_breakdown_page,
    budget_settings::{get_budget_settings_page, update_budget_endpoint},
    endpoints,
    export::get_export,
    ledger_page::get_ledger_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_sub_category_picker,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_ledger_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(endpoints::EDIT_TRANSACTION_VIEW, get(get_edit_transaction_page))
        .route(endpoints::SETTINGS_VIEW, get(get_budget_settings_page))
        .route(endpoints::BREAKDOWN_VIEW, get(get_breakdown_page))
        .route(endpoints::SUB_CATEGORY_PICKER, get(get_sub_category_picker));

    // Form submissions answer with an HX-Redirect header or an alert fragment.
    let api = Router::new()
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::BUDGETS_API, post(update_budget_endpoint))
        .route(endpoints::EXPORT, get(get_export));

    pages
        .merge(api)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
