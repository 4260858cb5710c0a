// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{active_categories, currency_symbol};
use crate::db;
use crate::engine::budget::{BudgetReport, evaluate_budget};
use crate::engine::filter::{in_range, sum_by_kind, totals_by_category};
use crate::engine::range::RangeToken;
use crate::models::TransactionKind;
use crate::utils::{
    flag, fmt_money, fmt_percent, maybe_print_json, opt_str, parse_amount, pretty_table,
};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("set-limit", sub)) => set_limit(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("status", sub)) => status(conn, sub, now)?,
        _ => {}
    }
    Ok(())
}

fn set_limit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(opt_str(sub, "amount").context("amount missing")?)?;
    let mut budgets = db::load_budgets(conn)?;
    budgets.global_limit = amount;
    db::save_budgets(conn, &budgets)?;
    println!("Monthly budget limit set to {}", amount);
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = opt_str(sub, "category").context("category missing")?;
    let amount = parse_amount(opt_str(sub, "amount").context("amount missing")?)?;
    let mut budgets = db::load_budgets(conn)?;
    if amount.is_zero() {
        budgets.category_limits.remove(cat);
        println!("Budget cleared for {}", cat);
    } else {
        budgets.category_limits.insert(cat.to_string(), amount);
        println!("Budget set for {} = {}", cat, amount);
    }
    db::save_budgets(conn, &budgets)?;
    Ok(())
}

/// Budget utilization over the `--range` window, every active expense
/// category included.
pub fn status_report(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<BudgetReport> {
    let snapshot = db::load_snapshot(conn)?;
    let range = RangeToken::parse(opt_str(sub, "range").unwrap_or("month")).resolve(now);
    let in_window = in_range(&snapshot.transactions, &range);
    let total = sum_by_kind(in_window.iter().copied(), TransactionKind::Expense);
    let categories = active_categories(&snapshot.settings, TransactionKind::Expense);
    let spend = totals_by_category(
        in_window.iter().copied(),
        TransactionKind::Expense,
        &categories,
    );
    Ok(evaluate_budget(total, &snapshot.budgets, &spend))
}

fn status(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let report = status_report(conn, sub, now)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &report)? {
        return Ok(());
    }
    let sym = currency_symbol(&db::load_settings(conn)?.currency);
    println!(
        "Spent {} of {} ({} used)",
        fmt_money(&report.total_expense, sym),
        fmt_money(&report.global_limit, sym),
        fmt_percent(&report.global_utilization)
    );
    let rows = report
        .categories
        .iter()
        .map(|c| {
            let state = if c.over_budget {
                "over"
            } else if c.near_limit {
                "near limit"
            } else if c.alert {
                "alert"
            } else if c.limit.is_zero() {
                "no limit"
            } else {
                "ok"
            };
            vec![
                c.category.clone(),
                fmt_money(&c.spent, sym),
                if c.limit.is_zero() {
                    "-".to_string()
                } else {
                    fmt_money(&c.limit, sym)
                },
                fmt_percent(&c.utilization),
                state.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Limit", "Used", "Status"], rows)
    );
    if !report.alerts.is_empty() {
        println!("Budget alerts: {}", report.alerts.join(", "));
    }
    Ok(())
}
