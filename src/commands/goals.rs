// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{DEFAULT_CATEGORY_COLOR, currency_symbol};
use crate::db;
use crate::engine::goals::{GoalProgress, clamp_amount, goal_progress, with_delta};
use crate::error::ValidationError;
use crate::models::SavingsGoal;
use crate::utils::{
    flag, fmt_money, fmt_percent, maybe_print_json, opt_str, parse_amount, parse_date, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub, now)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("list", sub)) => list(conn, sub, now)?,
        Some(("contribute", sub)) => adjust(conn, sub, false)?,
        Some(("withdraw", sub)) => adjust(conn, sub, true)?,
        Some(("rm", sub)) => {
            let id = opt_str(sub, "id").context("id missing")?;
            if !db::delete_goal(conn, id)? {
                return Err(anyhow!("Goal '{}' not found", id));
            }
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn positive_target(raw: &str) -> Result<Decimal> {
    let target = parse_amount(raw)?;
    if target <= Decimal::ZERO {
        return Err(ValidationError::InvalidGoal("target amount must be positive".into()).into());
    }
    Ok(target)
}

/// Builds a goal from `goal add` arguments; the starting amount is clamped
/// into `[0, target]`.
pub fn goal_from_args(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<SavingsGoal> {
    let name = opt_str(sub, "name")
        .ok_or_else(|| ValidationError::InvalidGoal("name is required".into()))?;
    let target = positive_target(opt_str(sub, "target").context("target missing")?)?;
    let current = match opt_str(sub, "current") {
        Some(c) => parse_amount(c)?,
        None => Decimal::ZERO,
    };
    let deadline = match opt_str(sub, "deadline") {
        Some(d) => parse_date(d)?,
        None => now.date(),
    };
    Ok(SavingsGoal {
        id: String::new(),
        name: name.to_string(),
        target_amount: target,
        current_amount: clamp_amount(current, target),
        deadline,
        color: opt_str(sub, "color")
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
            .to_string(),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let goal = goal_from_args(sub, now)?;
    let id = db::insert_goal(conn, &goal)?;
    println!("Created goal '{}' (id {})", goal.name, id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = opt_str(sub, "id").context("id missing")?;
    let mut goal = db::get_goal(conn, id)?.ok_or_else(|| anyhow!("Goal '{}' not found", id))?;
    if let Some(name) = opt_str(sub, "name") {
        goal.name = name.to_string();
    }
    if let Some(target) = opt_str(sub, "target") {
        goal.target_amount = positive_target(target)?;
    }
    if let Some(current) = opt_str(sub, "current") {
        goal.current_amount = parse_amount(current)?;
    }
    goal.current_amount = clamp_amount(goal.current_amount, goal.target_amount);
    if let Some(deadline) = opt_str(sub, "deadline") {
        goal.deadline = parse_date(deadline)?;
    }
    if let Some(color) = opt_str(sub, "color") {
        goal.color = color.to_string();
    }
    db::update_goal(conn, &goal)?;
    println!("Updated goal {}", goal.id);
    Ok(())
}

/// Applies a contribution (or a withdrawal when `withdraw` is set) and
/// persists the clamped result.
pub fn adjust_goal(
    conn: &Connection,
    id: &str,
    amount: Decimal,
    withdraw: bool,
) -> Result<SavingsGoal> {
    let goal = db::get_goal(conn, id)?.ok_or_else(|| anyhow!("Goal '{}' not found", id))?;
    let delta = if withdraw { -amount } else { amount };
    let updated = with_delta(&goal, delta);
    db::update_goal(conn, &updated)?;
    Ok(updated)
}

fn adjust(conn: &Connection, sub: &clap::ArgMatches, withdraw: bool) -> Result<()> {
    let id = opt_str(sub, "id").context("id missing")?;
    let amount = parse_amount(opt_str(sub, "amount").context("amount missing")?)?;
    let goal = adjust_goal(conn, id, amount, withdraw)?;
    let sym = currency_symbol(&db::load_settings(conn)?.currency);
    println!(
        "{} '{}': now {} of {}",
        if withdraw { "Removed from" } else { "Added to" },
        goal.name,
        fmt_money(&goal.current_amount, sym),
        fmt_money(&goal.target_amount, sym)
    );
    Ok(())
}

pub fn progress_rows(conn: &Connection, now: NaiveDateTime) -> Result<Vec<GoalProgress>> {
    Ok(db::load_goals(conn)?
        .iter()
        .map(|g| goal_progress(g, now))
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let data = progress_rows(conn, now)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &data)? {
        return Ok(());
    }
    let sym = currency_symbol(&db::load_settings(conn)?.currency);
    let rows = data
        .iter()
        .map(|g| {
            let due = if g.complete {
                "complete".to_string()
            } else if g.days_remaining < 0 {
                format!("{} days overdue", g.days_remaining.abs())
            } else {
                format!("{} days left", g.days_remaining)
            };
            vec![
                g.id.clone(),
                g.name.clone(),
                fmt_money(&g.current_amount, sym),
                fmt_money(&g.target_amount, sym),
                fmt_percent(&g.percent),
                due,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Goal", "Saved", "Target", "Progress", "Due"], rows)
    );
    Ok(())
}
