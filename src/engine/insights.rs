// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-over-month spending observations.
//!
//! Expenses are split into the calendar month containing `now` and the month
//! before it. Insights come out grouped by rule, in this order:
//!
//! 1. total spend change versus last month (warning above +20%, praise below -10%)
//! 2. per-category spikes above +30%
//! 3. categories within 10% of their limit
//! 4. categories over their limit
//! 5. the top spending category
//! 6. pacing against the global limit
//! 7. fixed-threshold tips
//!
//! All insights are returned; callers decide how many to show
//! ([`MAX_DISPLAYED_INSIGHTS`] is the usual cut).

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::budget::{is_near_limit, is_over_budget, utilization};
use crate::engine::filter::{CategoryTotal, saturating_total, sums_in_first_seen_order};
use crate::engine::range::{days_in_month, previous_month};
use crate::models::{BudgetConfig, Transaction, TransactionKind};

pub const MAX_DISPLAYED_INSIGHTS: usize = 5;

const TOTAL_INCREASE_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const TOTAL_DECREASE_PCT: Decimal = Decimal::from_parts(10, 0, 0, true, 0);
const CATEGORY_SPIKE_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const PACING_MARGIN_PCT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

pub const DINING_CATEGORY: &str = "Food & Dining";
pub const DINING_TIP_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
pub const ENTERTAINMENT_CATEGORY: &str = "Entertainment";
pub const ENTERTAINMENT_TIP_THRESHOLD: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTopic {
    MonthOverMonth,
    CategorySpike,
    NearLimit,
    OverLimit,
    TopCategory,
    Pacing,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub topic: InsightTopic,
    pub category: Option<String>,
    pub title: String,
    pub description: String,
    /// Display string for the headline figure.
    pub value: Option<String>,
    /// The headline figure itself: a delta, headroom, overage, spend or percent.
    pub amount: Option<Decimal>,
}

impl Insight {
    fn new(kind: InsightKind, topic: InsightTopic, title: String, description: String) -> Self {
        Self {
            kind,
            topic,
            category: None,
            title,
            description,
            value: None,
            amount: None,
        }
    }

    fn for_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    fn with_value(mut self, value: String, amount: Decimal) -> Self {
        self.value = Some(value);
        self.amount = Some(amount);
        self
    }
}

struct MonthSplit<'a> {
    current: Vec<&'a Transaction>,
    previous: Vec<&'a Transaction>,
}

fn split_months(transactions: &[Transaction], now: NaiveDateTime) -> MonthSplit<'_> {
    let current_key = (now.year(), now.month());
    let previous_key = previous_month(&now);
    let mut split = MonthSplit {
        current: Vec::new(),
        previous: Vec::new(),
    };
    for t in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
        let Some(date) = t.occurred_on() else {
            continue;
        };
        let key = (date.year(), date.month());
        if key == current_key {
            split.current.push(t);
        } else if key == previous_key {
            split.previous.push(t);
        }
    }
    split
}

/// Saturates instead of overflowing, so a tiny baseline reads as a huge change.
fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    let delta = current - previous;
    delta
        .checked_div(previous)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if delta.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

fn lookup(totals: &[CategoryTotal], category: &str) -> Decimal {
    totals
        .iter()
        .find(|t| t.category == category)
        .map(|t| t.total)
        .unwrap_or(Decimal::ZERO)
}

pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &BudgetConfig,
    now: NaiveDateTime,
    symbol: &str,
) -> Vec<Insight> {
    let split = split_months(transactions, now);
    let current_total = saturating_total(split.current.iter().map(|t| t.amount));
    let previous_total = saturating_total(split.previous.iter().map(|t| t.amount));
    let current_by_cat = sums_in_first_seen_order(split.current.iter().copied());
    let previous_by_cat = sums_in_first_seen_order(split.previous.iter().copied());

    let mut insights = Vec::new();

    if previous_total > Decimal::ZERO {
        let change = percent_change(current_total, previous_total);
        let delta = current_total - previous_total;
        if change > TOTAL_INCREASE_PCT {
            insights.push(
                Insight::new(
                    InsightKind::Warning,
                    InsightTopic::MonthOverMonth,
                    "Spending increased significantly".to_string(),
                    format!(
                        "You've spent {:.0}% more this month compared to last month.",
                        change.abs()
                    ),
                )
                .with_value(format!("+{}{:.2}", symbol, delta), delta),
            );
        } else if change < TOTAL_DECREASE_PCT {
            insights.push(
                Insight::new(
                    InsightKind::Success,
                    InsightTopic::MonthOverMonth,
                    "Great job saving!".to_string(),
                    format!(
                        "You've spent {:.0}% less this month compared to last month.",
                        change.abs()
                    ),
                )
                .with_value(format!("-{}{:.2}", symbol, delta.abs()), delta),
            );
        }
    }

    for cat in &current_by_cat {
        let previous = lookup(&previous_by_cat, &cat.category);
        if previous <= Decimal::ZERO {
            continue;
        }
        let change = percent_change(cat.total, previous);
        if change > CATEGORY_SPIKE_PCT {
            let delta = cat.total - previous;
            insights.push(
                Insight::new(
                    InsightKind::Warning,
                    InsightTopic::CategorySpike,
                    format!("{} spending up", cat.category),
                    format!(
                        "You've spent {:.0}% more on {} this month.",
                        change, cat.category
                    ),
                )
                .for_category(&cat.category)
                .with_value(format!("+{}{:.2}", symbol, delta), delta),
            );
        }
    }

    for cat in &current_by_cat {
        let limit = budgets.limit_for(&cat.category);
        if is_near_limit(cat.total, limit) {
            let left = limit - cat.total;
            insights.push(
                Insight::new(
                    InsightKind::Info,
                    InsightTopic::NearLimit,
                    format!("{} near budget limit", cat.category),
                    format!(
                        "You've used {:.0}% of your {} budget.",
                        utilization(cat.total, limit),
                        cat.category
                    ),
                )
                .for_category(&cat.category)
                .with_value(format!("{}{:.2} left", symbol, left), left),
            );
        }
    }

    for cat in &current_by_cat {
        let limit = budgets.limit_for(&cat.category);
        if is_over_budget(cat.total, limit) {
            let over = cat.total - limit;
            insights.push(
                Insight::new(
                    InsightKind::Warning,
                    InsightTopic::OverLimit,
                    format!("{} over budget!", cat.category),
                    format!(
                        "You've exceeded your {} budget by {}{:.2}.",
                        cat.category, symbol, over
                    ),
                )
                .for_category(&cat.category)
                .with_value(
                    format!("{}{:.2} / {}{:.2}", symbol, cat.total, symbol, limit),
                    over,
                ),
            );
        }
    }

    // Strict comparison keeps the first-seen category on ties.
    let top = current_by_cat.iter().fold(None::<&CategoryTotal>, |best, c| match best {
        Some(b) if c.total <= b.total => Some(b),
        _ => Some(c),
    });
    if let Some(top) = top {
        insights.push(
            Insight::new(
                InsightKind::Info,
                InsightTopic::TopCategory,
                "Top spending category".to_string(),
                format!("{} is your biggest expense this month.", top.category),
            )
            .for_category(&top.category)
            .with_value(format!("{}{:.2}", symbol, top.total), top.total),
        );
    }

    if budgets.global_limit > Decimal::ZERO {
        let used = utilization(current_total, budgets.global_limit);
        let days = Decimal::from(days_in_month(now.year(), now.month()));
        let expected = Decimal::from(now.day()) / days * Decimal::ONE_HUNDRED;
        if used < expected - PACING_MARGIN_PCT {
            insights.push(
                Insight::new(
                    InsightKind::Success,
                    InsightTopic::Pacing,
                    "On track with budget!".to_string(),
                    "You're spending less than expected for this point in the month.".to_string(),
                )
                .with_value(format!("{:.0}% used", used), used),
            );
        }
    }

    if lookup(&current_by_cat, DINING_CATEGORY) > DINING_TIP_THRESHOLD {
        insights.push(
            Insight::new(
                InsightKind::Tip,
                InsightTopic::Tip,
                "Tip: Reduce dining expenses".to_string(),
                "Consider meal prepping to save on food costs.".to_string(),
            )
            .for_category(DINING_CATEGORY),
        );
    }
    if lookup(&current_by_cat, ENTERTAINMENT_CATEGORY) > ENTERTAINMENT_TIP_THRESHOLD {
        insights.push(
            Insight::new(
                InsightKind::Tip,
                InsightTopic::Tip,
                "Tip: Entertainment savings".to_string(),
                "Look for free events or subscription alternatives.".to_string(),
            )
            .for_category(ENTERTAINMENT_CATEGORY),
        );
    }

    log::trace!("generated {} insights", insights.len());
    insights
}
