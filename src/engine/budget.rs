// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::filter::{CategoryTotal, in_range, sum_by_kind};
use crate::engine::range::DateRange;
use crate::models::{BudgetConfig, Transaction, TransactionKind};

/// Share of a limit above which a category is flagged.
pub const ALERT_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
/// Share of a limit above which a category counts as near its limit.
pub const NEAR_LIMIT_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// `spent / limit * 100`, or zero when no limit is set.
pub fn utilization(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .checked_div(limit)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub fn is_alerting(spent: Decimal, limit: Decimal) -> bool {
    limit > Decimal::ZERO && spent > limit * ALERT_RATIO
}

pub fn is_over_budget(spent: Decimal, limit: Decimal) -> bool {
    limit > Decimal::ZERO && spent > limit
}

pub fn is_near_limit(spent: Decimal, limit: Decimal) -> bool {
    limit > Decimal::ZERO && spent > limit * NEAR_LIMIT_RATIO && spent <= limit
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    pub utilization: Decimal,
    pub alert: bool,
    pub near_limit: bool,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub total_expense: Decimal,
    pub global_limit: Decimal,
    pub global_utilization: Decimal,
    pub categories: Vec<CategoryBudgetStatus>,
    /// Categories past the alert ratio, in the order of `categories`.
    pub alerts: Vec<String>,
}

/// Compares spend against the configured limits. `category_spend` should list
/// every category to report on, zero spend included, in canonical order.
pub fn evaluate_budget(
    total_expense: Decimal,
    config: &BudgetConfig,
    category_spend: &[CategoryTotal],
) -> BudgetReport {
    let categories: Vec<CategoryBudgetStatus> = category_spend
        .iter()
        .map(|c| {
            let limit = config.limit_for(&c.category);
            CategoryBudgetStatus {
                category: c.category.clone(),
                spent: c.total,
                limit,
                utilization: utilization(c.total, limit),
                alert: is_alerting(c.total, limit),
                near_limit: is_near_limit(c.total, limit),
                over_budget: is_over_budget(c.total, limit),
            }
        })
        .collect();
    let alerts = categories
        .iter()
        .filter(|c| c.alert)
        .map(|c| c.category.clone())
        .collect();
    BudgetReport {
        total_expense,
        global_limit: config.global_limit,
        global_utilization: utilization(total_expense, config.global_limit),
        categories,
        alerts,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub remaining: Decimal,
    pub utilization: Decimal,
}

/// Overview totals for the transactions inside `range`.
pub fn summarize(
    transactions: &[Transaction],
    range: &DateRange,
    global_limit: Decimal,
) -> Summary {
    let in_window = in_range(transactions, range);
    let income = sum_by_kind(in_window.iter().copied(), TransactionKind::Income);
    let expenses = sum_by_kind(in_window.iter().copied(), TransactionKind::Expense);
    log::trace!("summary over {} transactions", in_window.len());
    Summary {
        income,
        expenses,
        remaining: income - expenses,
        utilization: utilization(expenses, global_limit),
    }
}
