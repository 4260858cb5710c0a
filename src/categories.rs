// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Built-in category and currency catalogues, and the active category set
//! (built-ins followed by the user's custom entries).

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{CustomCategory, TransactionKind, UserSettings};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_CATEGORY_COLOR: &str = "#85C1E2";
pub const DEFAULT_BUDGET_LIMIT: Decimal = Decimal::from_parts(2500, 0, 0, false, 0);
/// Limit used for an expense category that has no default of its own.
pub const FALLBACK_CATEGORY_BUDGET: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

#[derive(Debug, Clone, Copy)]
pub struct BuiltinCategory {
    pub name: &'static str,
    pub color: &'static str,
    pub budget: Decimal,
}

const fn builtin(name: &'static str, color: &'static str, budget: u32) -> BuiltinCategory {
    BuiltinCategory {
        name,
        color,
        budget: Decimal::from_parts(budget, 0, 0, false, 0),
    }
}

pub const EXPENSE_CATEGORIES: &[BuiltinCategory] = &[
    builtin("Food & Dining", "#FF6B6B", 500),
    builtin("Transportation", "#4ECDC4", 300),
    builtin("Entertainment", "#45B7D1", 200),
    builtin("Bills & Utilities", "#FFA07A", 400),
    builtin("Shopping", "#98D8C8", 300),
    builtin("Healthcare", "#F7DC6F", 200),
    builtin("Education", "#BB8FCE", 150),
    builtin("Other", "#85C1E2", 100),
];

pub const INCOME_CATEGORIES: &[BuiltinCategory] = &[
    builtin("Salary", "#4ade80", 0),
    builtin("Freelance", "#34d399", 0),
    builtin("Investment", "#22c55e", 0),
    builtin("Other", "#85C1E2", 0),
];

#[derive(Debug, Clone, Copy)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
    Currency {
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    Currency {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
    Currency {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
    },
    Currency {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
    },
    Currency {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
    },
    Currency {
        code: "CHF",
        symbol: "Fr",
        name: "Swiss Franc",
    },
    Currency {
        code: "CNY",
        symbol: "¥",
        name: "Chinese Yuan",
    },
    Currency {
        code: "INR",
        symbol: "₹",
        name: "Indian Rupee",
    },
    Currency {
        code: "NGN",
        symbol: "₦",
        name: "Nigerian Naira",
    },
    Currency {
        code: "ZAR",
        symbol: "R",
        name: "South African Rand",
    },
    Currency {
        code: "BRL",
        symbol: "R$",
        name: "Brazilian Real",
    },
    Currency {
        code: "MXN",
        symbol: "$",
        name: "Mexican Peso",
    },
    Currency {
        code: "KRW",
        symbol: "₩",
        name: "South Korean Won",
    },
    Currency {
        code: "SGD",
        symbol: "S$",
        name: "Singapore Dollar",
    },
    Currency {
        code: "AED",
        symbol: "د.إ",
        name: "UAE Dirham",
    },
];

static SYMBOLS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CURRENCIES.iter().map(|c| (c.code, c.symbol)).collect());

pub fn is_known_currency(code: &str) -> bool {
    SYMBOLS.contains_key(code)
}

/// Symbol for a currency code; unknown codes resolve to the default currency.
pub fn currency_symbol(code: &str) -> &'static str {
    SYMBOLS
        .get(code.trim().to_ascii_uppercase().as_str())
        .or_else(|| SYMBOLS.get(DEFAULT_CURRENCY))
        .copied()
        .unwrap_or("$")
}

pub fn builtins(kind: TransactionKind) -> &'static [BuiltinCategory] {
    match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
    }
}

pub fn is_builtin(kind: TransactionKind, name: &str) -> bool {
    builtins(kind).iter().any(|c| c.name == name)
}

/// Canonical category order for a kind: built-ins first, then custom entries
/// in the order they were added.
pub fn active_categories(settings: &UserSettings, kind: TransactionKind) -> Vec<String> {
    let mut out: Vec<String> = builtins(kind).iter().map(|c| c.name.to_string()).collect();
    for custom in settings.custom_categories(kind) {
        if !out.contains(&custom.name) {
            out.push(custom.name.clone());
        }
    }
    out
}

pub fn is_active_category(settings: &UserSettings, kind: TransactionKind, name: &str) -> bool {
    is_builtin(kind, name)
        || settings
            .custom_categories(kind)
            .iter()
            .any(|c| c.name == name)
}

pub fn category_color(settings: &UserSettings, name: &str) -> String {
    EXPENSE_CATEGORIES
        .iter()
        .chain(INCOME_CATEGORIES)
        .find(|c| c.name == name)
        .map(|c| c.color.to_string())
        .or_else(|| {
            settings
                .custom_expense_categories
                .iter()
                .chain(&settings.custom_income_categories)
                .find(|c| c.name == name)
                .map(|c| c.color.clone())
        })
        .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string())
}

/// Per-category limits a fresh profile starts with.
pub fn default_category_budgets() -> BTreeMap<String, Decimal> {
    EXPENSE_CATEGORIES
        .iter()
        .map(|c| {
            let budget = if c.budget.is_zero() {
                FALLBACK_CATEGORY_BUDGET
            } else {
                c.budget
            };
            (c.name.to_string(), budget)
        })
        .collect()
}

pub fn add_custom_category(
    settings: &mut UserSettings,
    kind: TransactionKind,
    name: &str,
    color: Option<&str>,
    budget: Option<Decimal>,
) -> Result<CustomCategory, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if is_active_category(settings, kind, name) {
        return Err(ValidationError::DuplicateCategory(name.to_string()));
    }
    let entry = CustomCategory {
        name: name.to_string(),
        color: color
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
        budget: match kind {
            TransactionKind::Expense => budget,
            TransactionKind::Income => None,
        },
    };
    settings.custom_categories_mut(kind).push(entry.clone());
    Ok(entry)
}

pub fn remove_custom_category(
    settings: &mut UserSettings,
    kind: TransactionKind,
    name: &str,
) -> Result<CustomCategory, ValidationError> {
    let name = name.trim();
    if is_builtin(kind, name) {
        return Err(ValidationError::BuiltinCategory(name.to_string()));
    }
    let list = settings.custom_categories_mut(kind);
    match list.iter().position(|c| c.name == name) {
        Some(idx) => Ok(list.remove(idx)),
        None => Err(ValidationError::UnknownCategory {
            category: name.to_string(),
            kind,
        }),
    }
}
