// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

/// Number of trailing months kept for trend charts.
pub const ROLLUP_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Income and expense totals per calendar month over the whole snapshot,
/// ascending, limited to the trailing [`ROLLUP_MONTHS`] months that have data.
pub fn monthly_rollup(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    trailing_rollup(transactions, ROLLUP_MONTHS)
}

pub fn trailing_rollup(transactions: &[Transaction], months: usize) -> Vec<MonthlyTotals> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let Some(date) = t.occurred_on() else {
            continue;
        };
        let entry = map
            .entry(date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TransactionKind::Income => entry.0 = entry.0.saturating_add(t.amount),
            TransactionKind::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }
    let skip = map.len().saturating_sub(months);
    map.into_iter()
        .skip(skip)
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
        })
        .collect()
}
