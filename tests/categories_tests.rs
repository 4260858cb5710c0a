// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal_macros::dec;
use spendwise::categories::{
    active_categories, add_custom_category, category_color, currency_symbol,
    remove_custom_category, DEFAULT_CATEGORY_COLOR,
};
use spendwise::error::ValidationError;
use spendwise::models::{TransactionKind, UserSettings};
use spendwise::{cli, commands::categories, commands::settings, db};

#[test]
fn builtins_come_first_then_custom_in_insertion_order() {
    let mut s = UserSettings::default();
    add_custom_category(&mut s, TransactionKind::Expense, "Pets", Some("#123456"), Some(dec!(80)))
        .unwrap();
    add_custom_category(&mut s, TransactionKind::Expense, "Gifts", None, None).unwrap();
    let names = active_categories(&s, TransactionKind::Expense);
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Food & Dining");
    assert_eq!(&names[8..], ["Pets", "Gifts"]);
    assert_eq!(category_color(&s, "Pets"), "#123456");
    assert_eq!(category_color(&s, "Gifts"), DEFAULT_CATEGORY_COLOR);
    assert_eq!(active_categories(&s, TransactionKind::Income).len(), 4);
}

#[test]
fn builtins_and_duplicates_are_rejected() {
    let mut s = UserSettings::default();
    assert_eq!(
        remove_custom_category(&mut s, TransactionKind::Expense, "Shopping"),
        Err(ValidationError::BuiltinCategory("Shopping".into()))
    );
    assert_eq!(
        add_custom_category(&mut s, TransactionKind::Income, "Salary", None, None),
        Err(ValidationError::DuplicateCategory("Salary".into()))
    );
    assert_eq!(
        add_custom_category(&mut s, TransactionKind::Income, "  ", None, None),
        Err(ValidationError::EmptyCategory)
    );
    add_custom_category(&mut s, TransactionKind::Income, "Rent", None, Some(dec!(10))).unwrap();
    // Income categories carry no budget.
    assert_eq!(s.custom_income_categories[0].budget, None);
    let removed = remove_custom_category(&mut s, TransactionKind::Income, "Rent").unwrap();
    assert_eq!(removed.name, "Rent");
    assert!(remove_custom_category(&mut s, TransactionKind::Income, "Rent").is_err());
}

#[test]
fn currency_symbols_fall_back_to_dollar() {
    assert_eq!(currency_symbol("EUR"), "€");
    assert_eq!(currency_symbol("inr"), "₹");
    assert_eq!(currency_symbol("XYZ"), "$");
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn category_add_stores_budget_limit() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "spendwise", "category", "add", "--type", "expense", "--name", "Pets", "--budget", "75",
    ]);
    if let Some(("category", m)) = matches.subcommand() {
        categories::handle(&conn, m).unwrap();
    } else {
        panic!("no category subcommand");
    }
    let s = db::load_settings(&conn).unwrap();
    assert_eq!(s.custom_expense_categories.len(), 1);
    assert_eq!(db::load_budgets(&conn).unwrap().limit_for("Pets"), dec!(75));
}

#[test]
fn settings_validate_currency_and_email() {
    let conn = setup();
    assert!(settings::set_currency(&conn, "XYZ").is_err());
    assert_eq!(settings::set_currency(&conn, "jpy").unwrap().currency, "JPY");

    assert!(settings::set_email_reports(&conn, Some("not-an-email")).is_err());
    let on = settings::set_email_reports(&conn, Some("me@example.com")).unwrap();
    assert!(on.email_reports);
    let off = settings::set_email_reports(&conn, None).unwrap();
    assert!(!off.email_reports);
    assert_eq!(off.report_email, "me@example.com");

    let stored = db::load_settings(&conn).unwrap();
    assert_eq!(stored.currency, "JPY");
    assert!(!stored.email_reports);
}
