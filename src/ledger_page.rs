//! The ledger page: the selected month's net figure, the rotating budget
//! banner and the month's transactions, newest first.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use time::{Date, Time};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    app_state::LedgerState,
    budget::{Budget, BudgetUsage},
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, TAG_BADGE_STYLE, base, format_currency, format_number},
    ledger::LedgerView,
    month::{MonthKey, MonthQuery},
    navigation::Footer,
    transaction::{ListSource, Transaction},
};

/// How long each budget banner slide is shown.
const BANNER_ROTATION_MS: u32 = 5000;
/// How far the page must scroll before the header switches to compact mode.
const COMPACT_HEADER_SCROLL_PX: u32 = 80;

/// Renders the ledger for the month in the query, or the current month.
pub async fn get_ledger_page(
    State(state): State<LedgerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(&state.local_timezone)?;
    let listing = state.gateway.list_with_source().await;
    let budget = state.budgets.get(month).unwrap_or_else(|error| {
        tracing::error!("Could not read the budget for {month}: {error}");
        Budget::default()
    });

    let view = LedgerView::new(listing.transactions, month);

    Ok(ledger_view(&view, &budget, listing.source).into_response())
}

fn ledger_view(view: &LedgerView, budget: &Budget, source: ListSource) -> Markup {
    let month = view.selected_month();
    let net = view.monthly_net();
    let net_style = if net >= 0.0 {
        "text-emerald-400"
    } else {
        "text-[#ff7979]"
    };
    let transactions = view.month_transactions_newest_first();
    let usage = view.budget_usage(budget);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div id="ledger-header" class="header-container sticky top-0 z-30 flex flex-col"
            {
                header class="header-bg text-white px-6 pt-6 pb-2"
                {
                    div class="flex justify-between items-start mb-4"
                    {
                        a
                            href=(endpoints::with_month(endpoints::SETTINGS_VIEW, month))
                            class="text-sm font-bold opacity-80 hover:opacity-100"
                        {
                            "設定"
                        }

                        div class="text-center flex-1"
                        {
                            div class="header-year text-3xl font-black opacity-30 leading-none"
                            {
                                (month.year())
                            }
                            div class="header-month text-6xl font-black leading-none mt-1"
                            {
                                (format!("{:02}", month.month()))
                            }
                        }

                        div class="bg-white/10 rounded-2xl p-4 min-w-[100px] text-right border border-white/10"
                        {
                            div class="text-[10px] font-bold opacity-70 tracking-widest mb-1" { "本月收支" }
                            div id="net-figure" class={ "text-xl font-black " (net_style) }
                            {
                                (format_currency(net))
                            }
                        }
                    }

                    (month_navigation(month))
                }

                (budget_banner(&usage))
            }

            main class="flex-1 px-4 py-4 space-y-2.5"
            {
                @if source == ListSource::LocalFallback {
                    p
                        id="local-fallback-notice"
                        class="text-center text-xs font-bold text-amber-600"
                        title="無法連線至雲端資料，以下為本機資料"
                    {
                        "顯示本機資料"
                    }
                }

                @if transactions.is_empty() {
                    div class="text-center py-20 opacity-30 font-bold" { "目前無任何紀錄" }
                }

                @for transaction in transactions {
                    (transaction_card(transaction))
                }
            }

            (Footer::new(endpoints::ROOT, month).into_html())
        }
    };

    base("明細", &[ledger_script()], &content)
}

fn month_navigation(month: MonthKey) -> Markup {
    html! {
        nav class="flex items-center justify-center gap-6 mb-1" aria-label="月份"
        {
            a
                href=(endpoints::with_month(endpoints::ROOT, month.previous()))
                class="p-2 opacity-50 hover:opacity-100"
                aria-label="上個月"
            {
                "‹"
            }

            form method="get" action=(endpoints::ROOT)
            {
                input
                    type="month"
                    name="month"
                    value=(month)
                    aria-label="選擇月份"
                    onchange="this.form.submit()"
                    class="bg-white text-blue-600 rounded-xl px-2 py-1 text-sm font-bold";
            }

            a
                href=(endpoints::with_month(endpoints::ROOT, month.next()))
                class="p-2 opacity-50 hover:opacity-100"
                aria-label="下個月"
            {
                "›"
            }
        }
    }
}

fn budget_banner(usage: &[BudgetUsage; 2]) -> Markup {
    html! {
        div id="budget-banner" class="morandi-track h-12 relative overflow-hidden shadow-inner"
        {
            @for (index, item) in usage.iter().enumerate() {
                div
                    class="budget-slide absolute inset-0"
                    data-slide=(index)
                    title={ "已花費 " (format_number(item.spent)) " / 預算 " (format_number(item.limit)) }
                    hidden[index != 0]
                {
                    div
                        class="morandi-fill absolute inset-y-0 left-0"
                        style={ "width: " (item.percentage) "%" }
                    {}

                    div class="absolute inset-0 flex items-center justify-center gap-10 px-8"
                    {
                        span class="text-xl font-black morandi-text-dark" { (item.person) }

                        div class="flex items-center gap-4 morandi-text-dark"
                        {
                            span class="text-sm font-black"
                            {
                                "剩餘 " (format_number(item.remaining)) " 元"
                            }
                            span class="text-sm font-black"
                            {
                                "已使用 " (item.percentage) "%"
                            }
                        }
                    }
                }
            }

            div class="absolute bottom-1 inset-x-0 flex justify-center gap-1.5"
            {
                @for index in 0..usage.len() {
                    div
                        class=(if index == 0 { "banner-dot active" } else { "banner-dot" })
                        data-dot=(index)
                    {}
                }
            }
        }
    }
}

fn transaction_card(transaction: &Transaction) -> Markup {
    let fields = &transaction.fields;
    let main = fields.main_category();
    let initial = main.label().graphemes(true).next().unwrap_or_default();
    let is_income = main.is_income();
    let amount_style = if is_income {
        "text-lg font-black text-emerald-500"
    } else {
        "text-lg font-black text-slate-800"
    };

    html! {
        a
            href=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id.as_str()))
            class="transaction-card bg-white rounded-[18px] p-3 px-4 shadow-sm border
            border-slate-100 flex items-center gap-4 active:scale-[0.98] transition-all"
            data-id=(transaction.id)
        {
            div class="flex flex-col items-center gap-1.5 min-w-[32px]"
            {
                div class="diamond-icon" style={ "background-color: " (main.color()) }
                {
                    span class="font-black text-sm" { (initial) }
                }
                span class="text-[9px] text-slate-300 font-bold text-center leading-none"
                {
                    (fields.category.sub())
                }
            }

            div class="flex-1 min-w-0"
            {
                div class="flex justify-between items-start"
                {
                    div class="flex items-center gap-2"
                    {
                        span class="card-date text-sm font-black text-slate-700" { (month_day(fields.date)) }
                        span class="card-time text-[10px] text-slate-400 font-medium" { (hour_minute(fields.time)) }
                    }
                    div class={ "card-amount " (amount_style) }
                    {
                        @if !is_income { "-" }
                        (format_number(fields.amount))
                    }
                }

                h4 class="font-bold text-slate-600 text-[15px] mb-1 truncate leading-tight"
                {
                    (transaction.display_description())
                }

                div class="flex flex-wrap gap-1"
                {
                    @for tag in &fields.tags {
                        span class={ "tag-chip " (TAG_BADGE_STYLE) } { "#" (tag) }
                    }
                }
            }
        }
    }
}

fn month_day(date: Date) -> String {
    format!("{:02}-{:02}", date.month() as u8, date.day())
}

fn hour_minute(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Rotates the budget banner and toggles the compact header. Presentation only.
fn ledger_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const slides = document.querySelectorAll('#budget-banner .budget-slide');
            const dots = document.querySelectorAll('#budget-banner .banner-dot');
            let active = 0;
            setInterval(function() {{
                active = (active + 1) % slides.length;
                slides.forEach((slide, index) => slide.hidden = index !== active);
                dots.forEach((dot, index) => dot.classList.toggle('active', index === active));
            }}, {BANNER_ROTATION_MS});

            const header = document.getElementById('ledger-header');
            window.addEventListener('scroll', function() {{
                header.classList.toggle('compact', window.scrollY > {COMPACT_HEADER_SCROLL_PX});
            }});
        }});"#
    )))
}
