// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use spendwise::models::RecurringFrequency;
use spendwise::{cli, commands::transactions, db};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 25)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    for day in 1..=3 {
        run(
            &conn,
            &[
                "spendwise", "tx", "add", "--type", "expense", "--amount", "10", "--category",
                "Shopping", "--description", "Socks", "--date", &format!("2025-01-0{}", day),
            ],
        )
        .unwrap();
    }
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("tx", m)) => transactions::handle(conn, m, now()),
        _ => panic!("no tx subcommand"),
    }
}

fn list(conn: &Connection, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut full = vec!["spendwise", "tx", "list"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m, now()).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[0].amount, "10.00");
}

#[test]
fn list_filters_by_kind_category_and_text() {
    let conn = setup();
    run(
        &conn,
        &[
            "spendwise", "tx", "add", "--type", "income", "--amount", "2000", "--category",
            "Salary", "--description", "January pay", "--date", "2025-01-15", "--recurring",
            "monthly",
        ],
    )
    .unwrap();

    let income = list(&conn, &["--type", "income"]);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].recurring, "monthly");

    assert_eq!(list(&conn, &["--category", "Shopping"]).len(), 3);
    assert_eq!(list(&conn, &["--search", "PAY"]).len(), 1);
    assert_eq!(list(&conn, &["--range", "week"]).len(), 0);
}

#[test]
fn add_defaults_to_today_and_rejects_bad_input() {
    let conn = setup();
    run(
        &conn,
        &["spendwise", "tx", "add", "--type", "expense", "--amount", "5", "--category", "Other"],
    )
    .unwrap();
    let rows = list(&conn, &["--range", "today"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-01-25");

    let unknown = run(
        &conn,
        &["spendwise", "tx", "add", "--type", "income", "--amount", "5", "--category", "Shopping"],
    );
    assert!(unknown.is_err());
    let not_a_number = run(
        &conn,
        &["spendwise", "tx", "add", "--type", "expense", "--amount", "abc", "--category", "Other"],
    );
    assert!(not_a_number.is_err());
    let negative = run(
        &conn,
        &["spendwise", "tx", "add", "--type", "expense", "--amount=-3", "--category", "Other"],
    );
    assert!(negative.is_err());
    for amount in ["0.001", "1000000000000.01", "79228162514264337593543950335"] {
        let out_of_range = run(
            &conn,
            &[
                "spendwise", "tx", "add", "--type", "expense", "--amount", amount, "--category",
                "Other",
            ],
        );
        assert!(out_of_range.is_err(), "{} should be rejected", amount);
    }
    assert_eq!(db::load_transactions(&conn).unwrap().len(), 4);
}

#[test]
fn edit_updates_fields_in_place() {
    let conn = setup();
    run(
        &conn,
        &[
            "spendwise", "tx", "edit", "--id", "2", "--amount", "12.75", "--category",
            "Entertainment", "--recurring", "weekly",
        ],
    )
    .unwrap();
    let t = db::get_transaction(&conn, "2").unwrap().unwrap();
    assert_eq!(t.amount, dec!(12.75));
    assert_eq!(t.category, "Entertainment");
    assert_eq!(t.description, "Socks");
    assert_eq!(t.recurring, Some(RecurringFrequency::Weekly));

    assert!(run(&conn, &["spendwise", "tx", "edit", "--id", "2", "--category", "Salary"]).is_err());
    assert!(run(&conn, &["spendwise", "tx", "edit", "--id", "99", "--amount", "1"]).is_err());
}

#[test]
fn removed_transaction_can_be_restored() {
    let conn = setup();
    let removed = db::delete_transaction(&conn, "3").unwrap().unwrap();
    assert_eq!(db::load_transactions(&conn).unwrap().len(), 2);

    // A new record never reuses the removed id.
    run(
        &conn,
        &["spendwise", "tx", "add", "--type", "expense", "--amount", "1", "--category", "Other"],
    )
    .unwrap();
    assert!(db::get_transaction(&conn, "3").unwrap().is_none());

    let record = serde_json::to_string(&removed).unwrap();
    let id = transactions::restore_record(&conn, &record).unwrap();
    assert_eq!(id, "3");
    assert_eq!(db::get_transaction(&conn, "3").unwrap().unwrap(), removed);
    assert!(transactions::restore_record(&conn, &record).is_err());

    assert!(run(&conn, &["spendwise", "tx", "rm", "--id", "42"]).is_err());
}

#[test]
fn restore_validates_like_add() {
    let conn = setup();
    let bad_date = r#"{"id":"","type":"expense","amount":"5","category":"Other",
        "description":"","date":"31/01/2025"}"#;
    assert!(transactions::restore_record(&conn, bad_date).is_err());
    let huge = r#"{"id":"","type":"expense","amount":"79228162514264337593543950335",
        "category":"Other","description":"","date":"2025-01-05"}"#;
    assert!(transactions::restore_record(&conn, huge).is_err());
    let negative = r#"{"id":"","type":"expense","amount":"-5","category":"Other",
        "description":"","date":"2025-01-05"}"#;
    assert!(transactions::restore_record(&conn, negative).is_err());
    assert_eq!(db::load_transactions(&conn).unwrap().len(), 3);

    let ok = r#"{"id":"","type":"expense","amount":"5.50","category":"Other",
        "description":"","date":"2025-01-05"}"#;
    let id = transactions::restore_record(&conn, ok).unwrap();
    assert_eq!(db::get_transaction(&conn, &id).unwrap().unwrap().amount, dec!(5.5));
}

#[test]
fn reset_clears_records_but_keeps_settings() {
    let mut conn = setup();
    spendwise::commands::settings::set_currency(&conn, "GBP").unwrap();
    db::reset(&mut conn).unwrap();
    let snapshot = db::load_snapshot(&conn).unwrap();
    assert!(snapshot.transactions.is_empty());
    assert!(snapshot.goals.is_empty());
    assert_eq!(snapshot.budgets, spendwise::models::BudgetConfig::default());
    assert_eq!(snapshot.settings.currency, "GBP");
}
