// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::{DEFAULT_BUDGET_LIMIT, DEFAULT_CURRENCY, default_category_budgets};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringFrequency::Weekly => "weekly",
            RecurringFrequency::Monthly => "monthly",
            RecurringFrequency::Yearly => "yearly",
        }
    }
}

impl FromStr for RecurringFrequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(RecurringFrequency::Weekly),
            "monthly" => Ok(RecurringFrequency::Monthly),
            "yearly" => Ok(RecurringFrequency::Yearly),
            _ => Err(ValidationError::InvalidFrequency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: String, // YYYY-MM-DD, kept as stored
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub recurring: Option<RecurringFrequency>,
}

impl Transaction {
    /// Calendar date of the transaction, or `None` when the stored value
    /// cannot be read as a date.
    pub fn occurred_on(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub color: String,
}

/// Global monthly limit plus per-category limits. A limit of zero means
/// "not set", never "nothing allowed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub global_limit: Decimal,
    #[serde(default)]
    pub category_limits: BTreeMap<String, Decimal>,
}

impl BudgetConfig {
    pub fn limit_for(&self, category: &str) -> Decimal {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            global_limit: DEFAULT_BUDGET_LIMIT,
            category_limits: default_category_budgets(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub currency: String,
    #[serde(default)]
    pub email_reports: bool,
    #[serde(default)]
    pub report_email: String,
    #[serde(default)]
    pub custom_expense_categories: Vec<CustomCategory>,
    #[serde(default)]
    pub custom_income_categories: Vec<CustomCategory>,
}

impl UserSettings {
    pub fn custom_categories(&self, kind: TransactionKind) -> &[CustomCategory] {
        match kind {
            TransactionKind::Expense => &self.custom_expense_categories,
            TransactionKind::Income => &self.custom_income_categories,
        }
    }

    pub fn custom_categories_mut(&mut self, kind: TransactionKind) -> &mut Vec<CustomCategory> {
        match kind {
            TransactionKind::Expense => &mut self.custom_expense_categories,
            TransactionKind::Income => &mut self.custom_income_categories,
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            email_reports: false,
            report_email: String::new(),
            custom_expense_categories: Vec::new(),
            custom_income_categories: Vec::new(),
        }
    }
}
