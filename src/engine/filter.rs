// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::range::DateRange;
use crate::models::{Transaction, TransactionKind};

/// Predicates applied to a transaction snapshot. `None` means "all".
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub range: DateRange,
    pub text: String,
}

impl TransactionFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            category: None,
            kind: None,
            range,
            text: String::new(),
        }
    }

    /// `"all"` clears the category predicate.
    pub fn category(mut self, category: &str) -> Self {
        self.category = if category.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category.to_string())
        };
        self
    }

    pub fn kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        let date_match = t
            .occurred_on()
            .map(|d| self.range.contains_date(d))
            .unwrap_or(false);
        let category_match = self.category.as_deref().is_none_or(|c| t.category == c);
        let kind_match = self.kind.is_none_or(|k| t.kind == k);
        date_match && category_match && kind_match && text_matches(t, &self.text)
    }
}

fn text_matches(t: &Transaction, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    t.description.to_lowercase().contains(&needle) || t.category.to_lowercase().contains(&needle)
}

/// Transactions matching every predicate, in input order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Date predicate only; the basis for overview totals and budget checks.
pub fn in_range<'a>(transactions: &'a [Transaction], range: &DateRange) -> Vec<&'a Transaction> {
    filter_transactions(transactions, &TransactionFilter::new(*range))
}

/// Newest first. The sort is stable, so equal dates keep their stored order;
/// unreadable dates go last.
pub fn sort_by_date_desc(items: &mut [&Transaction]) {
    items.sort_by(|a, b| b.occurred_on().cmp(&a.occurred_on()));
}

pub fn sorted_by_date_desc(mut items: Vec<&Transaction>) -> Vec<&Transaction> {
    sort_by_date_desc(&mut items);
    items
}

/// Sums amounts, pinning at `Decimal::MAX`/`MIN` rather than overflowing.
pub fn saturating_total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

pub fn sum_by_kind<'a, I>(transactions: I, kind: TransactionKind) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    saturating_total(
        transactions
            .into_iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// One entry per category in `categories` order, zero totals included.
/// Transactions in categories outside the list are not counted.
pub fn totals_by_category<'a, I>(
    transactions: I,
    kind: TransactionKind,
    categories: &[String],
) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .map(|c| CategoryTotal {
            category: c.clone(),
            total: Decimal::ZERO,
        })
        .collect();
    for t in transactions.into_iter().filter(|t| t.kind == kind) {
        if let Some(entry) = totals.iter_mut().find(|e| e.category == t.category) {
            entry.total = entry.total.saturating_add(t.amount);
        }
    }
    totals
}

/// Chart view of a breakdown: zero totals dropped, order kept.
pub fn nonzero_totals(totals: &[CategoryTotal]) -> Vec<CategoryTotal> {
    totals
        .iter()
        .filter(|t| !t.total.is_zero())
        .cloned()
        .collect()
}

/// Sums per category in first-seen order, for any category string.
pub fn sums_in_first_seen_order<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for t in transactions {
        match totals.iter_mut().find(|e| e.category == t.category) {
            Some(entry) => entry.total = entry.total.saturating_add(t.amount),
            None => totals.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
            }),
        }
    }
    totals
}
