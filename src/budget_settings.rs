//! The page and endpoint for setting each person's budget for a month.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::BudgetState,
    budget::Budget,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, base,
    },
    month::{MonthKey, MonthQuery},
    navigation::Footer,
    tag::Person,
};

/// Renders the budget form for the month in the query, or the current month.
pub async fn get_budget_settings_page(
    State(state): State<BudgetState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(&state.local_timezone)?;
    let budget = state.budgets.get(month).unwrap_or_else(|error| {
        tracing::error!("Could not read the budget for {month}: {error}");
        Budget::default()
    });

    Ok(budget_settings_view(month, &budget).into_response())
}

fn budget_settings_view(month: MonthKey, budget: &Budget) -> Markup {
    let content = html! {
        div class={ (FORM_CONTAINER_STYLE) " pb-28" }
        {
            h2 class="w-full text-2xl font-black text-slate-800 mb-6" { "設定值" }

            form
                hx-post=(endpoints::BUDGETS_API)
                hx-target-error="#alert-container"
                hx-disabled-elt="find button[type=submit]"
                class="w-full space-y-6"
            {
                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "選擇月份" }
                    input
                        name="month"
                        id="month"
                        type="month"
                        value=(month)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="flex gap-4"
                {
                    @for person in Person::ALL {
                        div class="flex-1"
                        {
                            label for=(person.key()) class=(FORM_LABEL_STYLE)
                            {
                                (person) " (預算)"
                            }
                            input
                                name=(person.key())
                                id=(person.key())
                                type="number"
                                inputmode="decimal"
                                step="any"
                                min="0"
                                value=(budget.limit(person))
                                class={ (FORM_TEXT_INPUT_STYLE) " font-black" };
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "確認並儲存" }
            }

            a
                href=(endpoints::with_month(endpoints::EXPORT, month))
                download
                class={ (LINK_STYLE) " mt-8 text-sm" }
            {
                "匯出本月 CSV"
            }
        }

        (Footer::new(endpoints::SETTINGS_VIEW, month).into_html())
    };

    base("設定", &[], &content)
}

/// The form data for saving a month's budget.
///
/// An empty limit counts as zero.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetForm {
    pub month: Option<String>,
    pub zhu: Option<String>,
    pub luo: Option<String>,
}

impl BudgetForm {
    fn into_budget(self) -> Result<(MonthKey, Budget), Error> {
        let month = match self.month.as_deref().map(str::trim) {
            Some(month) if !month.is_empty() => month.parse()?,
            _ => return Err(Error::MissingField("month")),
        };

        let budget = Budget::new(parse_limit(self.zhu)?, parse_limit(self.luo)?)?;

        Ok((month, budget))
    }
}

fn parse_limit(text: Option<String>) -> Result<f64, Error> {
    match text.as_deref().map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(text) => text
            .parse()
            .map_err(|_| Error::InvalidAmount(text.to_owned())),
    }
}

/// A route handler for saving a month's budget, redirects to the ledger for
/// that month on success.
pub async fn update_budget_endpoint(
    State(state): State<BudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let (month, budget) = match form.into_budget() {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::warn!("Rejected budget form: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.budgets.set(month, budget) {
        tracing::error!("Could not save the budget for {month}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::with_month(endpoints::ROOT, month)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
