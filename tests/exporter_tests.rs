// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise::models::{Transaction, TransactionKind};
use spendwise::{cli, commands::exporter, commands::importer, db};
use tempfile::tempdir;

fn tx(
    kind: TransactionKind,
    amount: Decimal,
    category: &str,
    desc: &str,
    date: &str,
) -> Transaction {
    Transaction {
        id: String::new(),
        kind,
        amount,
        category: category.to_string(),
        description: desc.to_string(),
        date: date.to_string(),
        receipt: None,
        recurring: None,
    }
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn export_filename_uses_the_date() {
    let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(exporter::export_filename(d), "budget-export-2025-03-07.csv");
}

#[test]
fn csv_quotes_only_descriptions() {
    let a = tx(
        TransactionKind::Expense,
        dec!(12.50),
        "Food & Dining",
        "Lunch, with team",
        "2025-01-20",
    );
    let b = tx(TransactionKind::Income, dec!(3000), "Salary", "", "2025-01-15");
    let mut out = Vec::new();
    exporter::write_csv(&mut out, &[&a, &b]).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Date,Type,Category,Description,Amount\n\
         2025-01-20,expense,Food & Dining,\"Lunch, with team\",12.5\n\
         2025-01-15,income,Salary,\"\",3000\n"
    );
}

#[test]
fn export_then_import_round_trip() {
    let conn = setup();
    for t in [
        tx(TransactionKind::Expense, dec!(42.10), "Shopping", "Shoes, red", "2025-01-03"),
        tx(TransactionKind::Income, dec!(900), "Freelance", "Logo work", "2025-01-09"),
        tx(TransactionKind::Expense, dec!(7), "My Custom", "Odd one", "2024-12-30"),
    ] {
        db::insert_transaction(&conn, &t).unwrap();
    }

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from(["spendwise", "export", "--out", &out_str]);
    let now = NaiveDate::from_ymd_opt(2025, 1, 20)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(&conn, m, now).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.starts_with("Date,Type,Category,Description,Amount\n2025-01-09,income"));

    let mut fresh = setup();
    let n = importer::import_transactions(&mut fresh, contents.as_bytes()).unwrap();
    assert_eq!(n, 3);
    let imported = db::load_transactions(&fresh).unwrap();
    assert_eq!(imported[0].category, "Freelance");
    assert_eq!(imported[1].description, "Shoes, red");
    assert_eq!(imported[1].amount, dec!(42.1));
    assert_eq!(imported[2].category, "My Custom");
    assert_eq!(imported[2].date, "2024-12-30");
}
