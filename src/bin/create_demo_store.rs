use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use serde_json::{Value, json};
use time::{Date, Duration, OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use household_ledger::{MONTHLY_BUDGETS_KEY, TRANSACTIONS_KEY, initialize_db};

/// A utility for creating a local store filled with demo data for the
/// household_ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// (days ago, time, main category, sub category, amount, description, tags)
type DemoRow = (i64, &'static str, &'static str, &'static str, f64, &'static str, &'static [&'static str]);

const DEMO_ROWS: [DemoRow; 10] = [
    (0, "12:10", "食", "三餐外食", 180.0, "便當", &["朱", "午餐"]),
    (1, "19:40", "食", "食材", 1260.0, "全聯買菜", &["羅", "全聯"]),
    (2, "08:00", "收", "薪水", 52000.0, "", &[]),
    (3, "21:15", "樂", "電影音樂", 640.0, "電影", &["朱", "羅"]),
    (5, "07:45", "行", "租車加油", 1100.0, "", &["朱", "中油捷利卡", "tiida"]),
    (8, "10:30", "住", "水電瓦斯", 2380.0, "電費", &["羅", "固定支出"]),
    (12, "18:20", "衣", "美妝保養", 890.0, "", &["羅", "刷卡"]),
    (20, "13:05", "育", "文具用品", 150.0, "筆記本", &["朱"]),
    (35, "09:00", "人", "保險", 3200.0, "", &["朱", "固定支出"]),
    (40, "20:00", "食", "茶飲酒類", 65.0, "", &["羅"]),
];

/// Create and populate a local store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'ledger.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo transactions...");
    let now = OffsetDateTime::now_utc();
    let transactions = DEMO_ROWS
        .iter()
        .map(|row| demo_transaction(now, row))
        .collect::<Result<Vec<_>, _>>()?;

    println!("Creating demo budgets...");
    let month = |date: Date| format!("{:04}-{:02}", date.year(), date.month() as u8);
    let this_month = month(now.date());
    let last_month = month(now.date().replace_day(1)? - Duration::days(1));
    let budgets = json!({
        this_month: { "zhu": 15000.0, "luo": 12000.0 },
        last_month: { "zhu": 12000.0, "luo": 12000.0 },
    });

    conn.execute(
        "INSERT INTO snapshot (key, value) VALUES (?1, ?2), (?3, ?4)",
        (
            TRANSACTIONS_KEY,
            Value::Array(transactions).to_string(),
            MONTHLY_BUDGETS_KEY,
            budgets.to_string(),
        ),
    )?;

    println!("Success!");

    Ok(())
}

fn demo_transaction(now: OffsetDateTime, row: &DemoRow) -> Result<Value, Box<dyn Error>> {
    let (days_ago, time, main_category, sub_category, amount, description, tags) = *row;
    let date = now.date() - Duration::days(days_ago);

    Ok(json!({
        "id": Uuid::new_v4().to_string(),
        "timestamp": (now - Duration::days(days_ago)).format(&Rfc3339)?,
        "date": date.to_string(),
        "time": time,
        "mainCategory": main_category,
        "subCategory": sub_category,
        "amount": amount,
        "description": description,
        "tags": tags,
    }))
}
