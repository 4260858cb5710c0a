// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{active_categories, category_color, currency_symbol};
use crate::db;
use crate::engine::budget::{Summary, summarize};
use crate::engine::filter::{in_range, nonzero_totals, totals_by_category};
use crate::engine::range::RangeToken;
use crate::engine::rollup::{MonthlyTotals, monthly_rollup};
use crate::models::TransactionKind;
use crate::utils::{flag, fmt_money, fmt_percent, maybe_print_json, opt_str, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub, now)?,
        Some(("categories", sub)) => categories(conn, sub, now)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn summary_report(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Summary> {
    let snapshot = db::load_snapshot(conn)?;
    let range = RangeToken::parse(opt_str(sub, "range").unwrap_or("month")).resolve(now);
    Ok(summarize(&snapshot.transactions, &range, snapshot.budgets.global_limit))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let s = summary_report(conn, sub, now)?;
    if !maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &s)? {
        let sym = currency_symbol(&db::load_settings(conn)?.currency);
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&s.income, sym)],
            vec!["Expenses".to_string(), fmt_money(&s.expenses, sym)],
            vec!["Remaining".to_string(), fmt_money(&s.remaining, sym)],
            vec!["Budget used".to_string(), fmt_percent(&s.utilization)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
    pub budget: Decimal,
    pub color: String,
}

/// Expense breakdown for charts: categories with no spend are left out.
pub fn category_breakdown(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<CategorySlice>> {
    let snapshot = db::load_snapshot(conn)?;
    let range = RangeToken::parse(opt_str(sub, "range").unwrap_or("month")).resolve(now);
    let names = active_categories(&snapshot.settings, TransactionKind::Expense);
    let totals = totals_by_category(
        in_range(&snapshot.transactions, &range),
        TransactionKind::Expense,
        &names,
    );
    Ok(nonzero_totals(&totals)
        .into_iter()
        .map(|t| CategorySlice {
            budget: snapshot.budgets.limit_for(&t.category),
            color: category_color(&snapshot.settings, &t.category),
            name: t.category,
            value: t.total,
        })
        .collect())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let data = category_breakdown(conn, sub, now)?;
    if !maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &data)? {
        let sym = currency_symbol(&db::load_settings(conn)?.currency);
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    fmt_money(&c.value, sym),
                    fmt_money(&c.budget, sym),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Budget"], rows));
    }
    Ok(())
}

pub fn monthly_report(conn: &Connection) -> Result<Vec<MonthlyTotals>> {
    Ok(monthly_rollup(&db::load_transactions(conn)?))
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = monthly_report(conn)?;
    if !maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    format!("{:.2}", m.income),
                    format!("{:.2}", m.expenses),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
