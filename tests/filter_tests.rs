// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise::engine::filter::{
    TransactionFilter, filter_transactions, nonzero_totals, sorted_by_date_desc, sum_by_kind,
    totals_by_category,
};
use spendwise::engine::range::resolve_range;
use spendwise::models::{Transaction, TransactionKind};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 25)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn tx(
    id: &str,
    kind: TransactionKind,
    amount: Decimal,
    category: &str,
    desc: &str,
    date: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount,
        category: category.to_string(),
        description: desc.to_string(),
        date: date.to_string(),
        receipt: None,
        recurring: None,
    }
}

fn sample() -> Vec<Transaction> {
    use TransactionKind::*;
    vec![
        tx("1", Expense, dec!(42.50), "Food & Dining", "Groceries at Market", "2025-01-20"),
        tx("2", Income, dec!(3000), "Salary", "January pay", "2025-01-15"),
        tx("3", Expense, dec!(60), "Transportation", "Fuel", "2025-01-20"),
        tx("4", Expense, dec!(15), "Entertainment", "Cinema", "not-a-date"),
        tx("5", Expense, dec!(120), "Shopping", "Shoes", "2024-10-02"),
    ]
}

#[test]
fn filtering_is_idempotent() {
    let txs = sample();
    let f = TransactionFilter::new(resolve_range("month", now()))
        .kind(Some(TransactionKind::Expense));
    let once: Vec<Transaction> = filter_transactions(&txs, &f).into_iter().cloned().collect();
    let twice: Vec<Transaction> = filter_transactions(&once, &f).into_iter().cloned().collect();
    assert_eq!(once, twice);
    assert_eq!(
        once.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        ["1", "3"]
    );
}

#[test]
fn text_search_is_case_insensitive_over_description_and_category() {
    let txs = sample();
    let all = resolve_range("all", now());
    let by_desc = filter_transactions(&txs, &TransactionFilter::new(all).text("MARKET"));
    assert_eq!(by_desc.len(), 1);
    assert_eq!(by_desc[0].id, "1");

    let by_cat = filter_transactions(&txs, &TransactionFilter::new(all).text("transport"));
    assert_eq!(by_cat.len(), 1);
    assert_eq!(by_cat[0].id, "3");
}

#[test]
fn category_all_clears_the_predicate() {
    let txs = sample();
    let all = resolve_range("all", now());
    let f = TransactionFilter::new(all).category("Shopping").category("all");
    assert!(f.category.is_none());
    let only = TransactionFilter::new(all).category("Shopping");
    assert_eq!(filter_transactions(&txs, &only).len(), 1);
}

#[test]
fn malformed_dates_never_match_a_range() {
    let txs = sample();
    let matched = filter_transactions(&txs, &TransactionFilter::new(resolve_range("all", now())));
    assert!(matched.iter().all(|t| t.id != "4"));
    assert_eq!(matched.len(), 4);
}

#[test]
fn sort_is_newest_first_and_stable() {
    let txs = sample();
    let sorted = sorted_by_date_desc(txs.iter().collect());
    let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
    // 1 and 3 share a date and keep their stored order; the bad date goes last.
    assert_eq!(ids, ["1", "3", "2", "5", "4"]);
}

#[test]
fn sums_and_breakdowns() {
    let txs = sample();
    assert_eq!(sum_by_kind(&txs, TransactionKind::Expense), dec!(237.50));
    assert_eq!(sum_by_kind(&txs, TransactionKind::Income), dec!(3000));
    assert_eq!(sum_by_kind(&Vec::<Transaction>::new(), TransactionKind::Expense), Decimal::ZERO);

    let cats = vec![
        "Food & Dining".to_string(),
        "Healthcare".to_string(),
        "Transportation".to_string(),
    ];
    let totals = totals_by_category(&txs, TransactionKind::Expense, &cats);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[1].category, "Healthcare");
    assert_eq!(totals[1].total, Decimal::ZERO);
    let chart = nonzero_totals(&totals);
    assert_eq!(
        chart.iter().map(|t| t.category.as_str()).collect::<Vec<_>>(),
        ["Food & Dining", "Transportation"]
    );
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    use TransactionKind::*;
    let txs = vec![
        tx("1", Expense, Decimal::MAX, "Shopping", "", "2025-01-10"),
        tx("2", Expense, dec!(1), "Shopping", "", "2025-01-11"),
    ];
    assert_eq!(sum_by_kind(&txs, Expense), Decimal::MAX);
    let totals = totals_by_category(&txs, Expense, &["Shopping".to_string()]);
    assert_eq!(totals[0].total, Decimal::MAX);
    let rollup = spendwise::engine::rollup::monthly_rollup(&txs);
    assert_eq!(rollup[0].expenses, Decimal::MAX);
}
