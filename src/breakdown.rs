//! The per-category breakdown of a month's expenses, shown as a pie chart
//! and a table.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    Error,
    app_state::LedgerState,
    category::MainCategory,
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, format_currency},
    ledger::LedgerView,
    month::{MonthKey, MonthQuery},
    navigation::Footer,
};

/// The HTML element ID of the pie chart container.
const CHART_ID: &str = "category-breakdown-chart";

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// Renders the expense breakdown for the month in the query, or the current month.
pub async fn get_breakdown_page(
    State(state): State<LedgerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(&state.local_timezone)?;
    let view = LedgerView::new(state.gateway.list().await, month);
    let totals = view.expenses_by_category();

    Ok(breakdown_view(month, &totals).into_response())
}

fn breakdown_view(month: MonthKey, totals: &BTreeMap<MainCategory, f64>) -> Markup {
    let total: f64 = totals.values().sum();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="header-bg text-white px-6 pt-6 pb-6 text-center"
            {
                div class="text-sm font-bold opacity-50" { (month) }
                h2 class="text-2xl font-black mt-1" { "支出分類" }
                div id="expense-total" class="text-lg font-black text-[#ff7979] mt-2"
                {
                    (format_currency(-total))
                }
            }

            main class="flex-1 px-4 py-4 space-y-4"
            {
                @if totals.is_empty() {
                    div class="text-center py-20 opacity-30 font-bold" { "目前無任何紀錄" }
                } @else {
                    div id=(CHART_ID) class="min-h-[320px] bg-white rounded-[18px] shadow-sm" {}

                    (breakdown_table(totals, total))
                }
            }

            (Footer::new(endpoints::BREAKDOWN_VIEW, month).into_html())
        }
    };

    let scripts = if totals.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            chart_script(&category_breakdown_chart(totals)),
        ]
    };

    base("圖表", &scripts, &content)
}

fn breakdown_table(totals: &BTreeMap<MainCategory, f64>, total: f64) -> Markup {
    html! {
        table class="w-full text-sm bg-white rounded-[18px] shadow-sm overflow-hidden"
        {
            thead class="text-xs text-slate-400"
            {
                tr
                {
                    th scope="col" class="px-4 py-3 text-left" { "分類" }
                    th scope="col" class="px-4 py-3 text-right" { "金額" }
                    th scope="col" class="px-4 py-3 text-right" { "比例" }
                }
            }

            tbody
            {
                @for (category, amount) in totals {
                    tr class="border-t border-slate-100" data-category=(category.label())
                    {
                        td class="px-4 py-3 font-bold text-slate-700"
                        {
                            span
                                class="inline-block w-3 h-3 rounded-sm mr-2 align-middle"
                                style={ "background-color: " (category.color()) }
                            {}
                            (category.label())
                        }
                        td class="px-4 py-3 text-right font-black text-slate-800"
                        {
                            (format_currency(*amount))
                        }
                        td class="px-4 py-3 text-right text-slate-500"
                        {
                            (share_of(*amount, total)) "%"
                        }
                    }
                }
            }
        }
    }
}

/// `amount` as a whole percentage of `total`, zero when `total` is zero.
fn share_of(amount: f64, total: f64) -> u8 {
    if total > 0.0 {
        (amount / total * 100.0).round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

pub(crate) fn category_breakdown_chart(totals: &BTreeMap<MainCategory, f64>) -> Chart {
    let colors = totals
        .keys()
        .map(|category| Color::from(category.color()))
        .collect::<Vec<_>>();
    let data = totals
        .iter()
        .map(|(category, amount)| (*amount, category.label()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("本月支出").left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("2%"))
        .color(colors)
        .series(
            Pie::new()
                .name("支出")
                .radius(vec!["40%", "68%"])
                .data(data),
        )
}

fn chart_script(chart: &Chart) -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            chart.setOption({});
            window.addEventListener('resize', chart.resize);
        }});"#,
        chart
    )))
}
