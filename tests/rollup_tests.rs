// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spendwise::engine::rollup::{ROLLUP_MONTHS, monthly_rollup, trailing_rollup};
use spendwise::models::{Transaction, TransactionKind};

fn tx(kind: TransactionKind, amount: Decimal, date: &str) -> Transaction {
    Transaction {
        id: String::new(),
        kind,
        amount,
        category: "Other".to_string(),
        description: String::new(),
        date: date.to_string(),
        receipt: None,
        recurring: None,
    }
}

#[test]
fn keeps_the_last_six_months_ascending() {
    let mut txs = Vec::new();
    for month in 1..=9 {
        txs.push(tx(TransactionKind::Expense, dec!(10), &format!("2024-{:02}-15", month)));
    }
    txs.push(tx(TransactionKind::Income, dec!(500), "2024-09-01"));
    txs.push(tx(TransactionKind::Expense, dec!(5), "2024-09-30"));

    let rollup = monthly_rollup(&txs);
    assert_eq!(rollup.len(), ROLLUP_MONTHS);
    let months: Vec<&str> = rollup.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(
        months,
        ["2024-04", "2024-05", "2024-06", "2024-07", "2024-08", "2024-09"]
    );
    let last = rollup.last().unwrap();
    assert_eq!(last.income, dec!(500));
    assert_eq!(last.expenses, dec!(15));
}

#[test]
fn months_without_data_are_not_invented() {
    let txs = vec![
        tx(TransactionKind::Expense, dec!(20), "2023-12-31"),
        tx(TransactionKind::Income, dec!(70), "2024-03-02"),
        tx(TransactionKind::Expense, dec!(1), "garbage"),
    ];
    let rollup = monthly_rollup(&txs);
    assert_eq!(rollup.len(), 2);
    assert_eq!(rollup[0].month, "2023-12");
    assert_eq!(rollup[0].income, Decimal::ZERO);
    assert_eq!(rollup[1].month, "2024-03");
    assert!(monthly_rollup(&[]).is_empty());
    assert_eq!(trailing_rollup(&txs, 1).len(), 1);
}
