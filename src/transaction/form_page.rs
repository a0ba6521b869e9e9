//! The pages for recording a new transaction and editing an existing one.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Time;

use crate::{
    Error,
    app_state::TransactionState,
    endpoints,
    html::{BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, loading_spinner},
    ledger::LedgerView,
    month::MonthKey,
    tag::Tags,
    timezone::{local_now, local_today},
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
};

/// Renders the form for a new transaction, dated now in the local timezone.
pub async fn get_new_transaction_page(State(state): State<TransactionState>) -> Result<Response, Error> {
    let now = local_now(&state.local_timezone)?;
    let time = Time::from_hms(now.hour(), now.minute(), 0).unwrap_or(now.time());
    let tags = Tags::new();
    let defaults = TransactionFormDefaults {
        date: now.date(),
        time,
        amount: None,
        description: "",
        category: None,
        tags: &tags,
    };

    let form = html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            hx-disabled-elt="find button[type=submit]"
            hx-indicator="#saving-indicator"
            class="w-full space-y-5"
        {
            (transaction_form_fields(&defaults))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "確認儲存" }
        }
    };

    Ok(form_page("記一筆", MonthKey::of(now.date()), &form).into_response())
}

/// Renders the form for editing the transaction with `transaction_id`.
///
/// # Errors
/// Returns [Error::NotFound] if the transaction is not in the current list.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let view = LedgerView::new(state.gateway.list().await, MonthKey::of(today));
    let transaction = view.find(&transaction_id).ok_or(Error::NotFound)?;

    let fields = &transaction.fields;
    let month = MonthKey::of(fields.date);
    let defaults = TransactionFormDefaults {
        date: fields.date,
        time: fields.time,
        amount: Some(fields.amount),
        description: &fields.description,
        category: Some(fields.category),
        tags: &fields.tags,
    };
    let transaction_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id.as_str());
    let delete_url = endpoints::with_month(&transaction_url, month);

    let form = html! {
        form
            hx-put=(transaction_url)
            hx-target-error="#alert-container"
            hx-disabled-elt="find button"
            hx-indicator="#saving-indicator"
            class="w-full space-y-5"
        {
            (transaction_form_fields(&defaults))

            div class="flex flex-row-reverse gap-3"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "更新紀錄" }

                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm="確定要刪除這筆紀錄嗎？"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "刪除"
                }
            }
        }
    };

    Ok(form_page("編輯明細", month, &form).into_response())
}

fn form_page(title: &str, month: MonthKey, form: &Markup) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            div class="flex w-full items-center justify-between mb-6"
            {
                h2 class="text-2xl font-black text-slate-800" { (title) }

                a
                    href=(endpoints::with_month(endpoints::ROOT, month))
                    aria-label="關閉"
                    class="w-10 h-10 flex items-center justify-center rounded-full
                    bg-slate-100 text-slate-400 text-xl font-black"
                {
                    "×"
                }
            }

            (form)

            p id="saving-indicator" class="htmx-indicator mt-4 text-sm font-bold text-slate-400"
            {
                (loading_spinner())
                "儲存中..."
            }
        }
    };

    base(title, &[], &content)
}
