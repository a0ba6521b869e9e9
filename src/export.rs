//! Downloads a month of transactions as CSV in the spreadsheet's column layout.

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use time::format_description::well_known::Rfc3339;

use crate::{
    Error, app_state::LedgerState, ledger::LedgerView, month::MonthQuery, transaction::Transaction,
};

const HEADER: [&str; 9] = [
    "Timestamp",
    "ID",
    "Date",
    "Time",
    "Main Category",
    "Sub Category",
    "Amount",
    "Description",
    "Tags",
];

/// A route handler that responds with the month in the query as a CSV file,
/// newest transactions first.
pub async fn get_export(
    State(state): State<LedgerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(&state.local_timezone)?;
    let view = LedgerView::new(state.gateway.list().await, month);
    let transactions = view.month_transactions_newest_first();

    let body = write_csv(&transactions)?;
    tracing::info!("Exported {} transactions for {month}", transactions.len());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"ledger-{month}.csv\""),
            ),
        ],
        body,
    )
        .into_response())
}

fn write_csv(transactions: &[&Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for transaction in transactions {
        let fields = &transaction.fields;
        let timestamp = transaction
            .timestamp
            .format(&Rfc3339)
            .map_err(|error| Error::CsvError(error.to_string()))?;

        writer.write_record([
            timestamp,
            transaction.id.to_string(),
            fields.date.to_string(),
            format!("{:02}:{:02}", fields.time.hour(), fields.time.minute()),
            fields.main_category().label().to_owned(),
            fields.category.sub().to_owned(),
            fields.amount.to_string(),
            fields.description.clone(),
            fields.tags.to_comma_separated(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::extract::{FromRef, Query, State};
    use time::macros::{date, time};

    use crate::{
        app_state::LedgerState,
        category::MainCategory,
        export::get_export,
        month::MonthQuery,
        test_utils::{assert_content_type, assert_status_ok, get_header, get_test_app_state},
        transaction::test_utils::fields_on,
    };

    #[tokio::test]
    async fn exports_month_newest_first() {
        let state = LedgerState::from_ref(&get_test_app_state());
        let mut dinner = fields_on(date!(2024 - 03 - 05), MainCategory::Food, "三餐外食", 250.5, &["朱", "晚餐"]);
        dinner.time = time!(19:30);
        dinner.description = "拉麵, 加蛋".to_owned();
        let seed = [
            fields_on(date!(2024 - 03 - 01), MainCategory::Income, "薪水", 3000.0, &[]),
            dinner,
            fields_on(date!(2024 - 04 - 01), MainCategory::Food, "食材", 99.0, &[]),
        ];
        for fields in seed {
            assert!(state.gateway.create(fields).await);
        }
        let query = Query(MonthQuery {
            month: Some("2024-03".to_owned()),
        });

        let response = get_export(State(state), query).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/csv; charset=utf-8");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"ledger-2024-03.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let mut reader = csv::Reader::from_reader(body.as_ref());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "Timestamp",
                "ID",
                "Date",
                "Time",
                "Main Category",
                "Sub Category",
                "Amount",
                "Description",
                "Tags"
            ]
        );

        let rows = reader
            .records()
            .map(|record| record.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].iter().skip(2).collect::<Vec<_>>(),
            vec!["2024-03-05", "19:30", "食", "三餐外食", "250.5", "拉麵, 加蛋", "朱,晚餐"]
        );
        assert_eq!(
            rows[1].iter().skip(2).collect::<Vec<_>>(),
            vec!["2024-03-01", "12:00", "收", "薪水", "3000", "", ""]
        );
    }
}
