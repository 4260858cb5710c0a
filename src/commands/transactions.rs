// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::is_active_category;
use crate::db;
use crate::engine::filter::{TransactionFilter, filter_transactions, sorted_by_date_desc};
use crate::engine::range::RangeToken;
use crate::error::ValidationError;
use crate::models::{RecurringFrequency, Transaction, TransactionKind, UserSettings};
use crate::utils::{
    check_amount, flag, maybe_print_json, opt_str, parse_amount, parse_date, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub, now)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("list", sub)) => list(conn, sub, now)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("restore", sub)) => restore(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_recurring(raw: Option<&str>) -> Result<Option<RecurringFrequency>, ValidationError> {
    match raw {
        None | Some("none") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

fn check_category(
    settings: &UserSettings,
    kind: TransactionKind,
    category: &str,
) -> Result<(), ValidationError> {
    if is_active_category(settings, kind, category) {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory {
            category: category.to_string(),
            kind,
        })
    }
}

/// Builds a new, validated transaction from `tx add` arguments.
pub fn transaction_from_args(
    settings: &UserSettings,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Transaction> {
    let kind: TransactionKind = opt_str(sub, "type")
        .context("type missing")?
        .parse()?;
    let amount = parse_amount(opt_str(sub, "amount").context("amount missing")?)?;
    let category = opt_str(sub, "category").context("category missing")?;
    check_category(settings, kind, category)?;
    let date = match opt_str(sub, "date") {
        Some(d) => parse_date(d)?,
        None => now.date(),
    };
    Ok(Transaction {
        id: String::new(),
        kind,
        amount,
        category: category.to_string(),
        description: opt_str(sub, "description").unwrap_or_default().to_string(),
        date: date.to_string(),
        receipt: opt_str(sub, "receipt").map(str::to_string),
        recurring: parse_recurring(opt_str(sub, "recurring"))?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let settings = db::load_settings(conn)?;
    let t = transaction_from_args(&settings, sub, now)?;
    let id = db::insert_transaction(conn, &t)?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        t.kind, t.amount, t.category, t.date, id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = opt_str(sub, "id").context("id missing")?;
    let mut t = db::get_transaction(conn, id)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;
    let settings = db::load_settings(conn)?;

    if let Some(kind) = opt_str(sub, "type") {
        t.kind = kind.parse()?;
    }
    if let Some(amount) = opt_str(sub, "amount") {
        t.amount = parse_amount(amount)?;
    }
    if let Some(category) = opt_str(sub, "category") {
        t.category = category.to_string();
    }
    if opt_str(sub, "type").is_some() || opt_str(sub, "category").is_some() {
        check_category(&settings, t.kind, &t.category)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        t.description = description.trim().to_string();
    }
    if let Some(date) = opt_str(sub, "date") {
        t.date = parse_date(date)?.to_string();
    }
    if let Some(receipt) = sub.get_one::<String>("receipt") {
        let receipt = receipt.trim();
        t.receipt = (!receipt.is_empty()).then(|| receipt.to_string());
    }
    if sub.get_one::<String>("recurring").is_some() {
        t.recurring = parse_recurring(opt_str(sub, "recurring"))?;
    }

    db::update_transaction(conn, &t)?;
    println!("Updated transaction {}", t.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = opt_str(sub, "id").context("id missing")?;
    match db::delete_transaction(conn, id)? {
        Some(removed) => {
            println!("Removed transaction {}", id);
            println!(
                "Undo with: spendwise tx restore --record '{}'",
                serde_json::to_string(&removed)?
            );
        }
        None => return Err(anyhow!("Transaction '{}' not found", id)),
    }
    Ok(())
}

/// Re-adds a previously removed record, keeping its id.
pub fn restore_record(conn: &Connection, json: &str) -> Result<String> {
    let mut t: Transaction = serde_json::from_str(json).context("Invalid transaction record")?;
    t.amount = check_amount(t.amount)?;
    t.date = parse_date(&t.date)?.to_string();
    if !t.id.trim().is_empty() && db::get_transaction(conn, &t.id)?.is_some() {
        return Err(anyhow!("Transaction '{}' already exists", t.id));
    }
    db::insert_transaction(conn, &t)
}

fn restore(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let record = opt_str(sub, "record").context("record missing")?;
    let id = restore_record(conn, record)?;
    println!("Restored transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let data = query_rows(conn, sub, now)?;
    if !maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.recurring.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount", "Recurring"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub recurring: String,
    pub receipt: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.clone(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            description: t.description.clone(),
            amount: format!("{:.2}", t.amount),
            recurring: t.recurring.map(|r| r.as_str().to_string()).unwrap_or_default(),
            receipt: t.receipt.clone().unwrap_or_default(),
        }
    }
}

/// Builds the filter described by `tx list` arguments.
pub fn filter_from_args(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<TransactionFilter> {
    let range = RangeToken::parse(opt_str(sub, "range").unwrap_or("all")).resolve(now);
    let kind = match opt_str(sub, "type") {
        None | Some("all") => None,
        Some(k) => Some(k.parse::<TransactionKind>()?),
    };
    Ok(TransactionFilter::new(range)
        .category(opt_str(sub, "category").unwrap_or("all"))
        .kind(kind)
        .text(opt_str(sub, "search").unwrap_or("")))
}

pub fn query_rows(
    conn: &Connection,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<TransactionRow>> {
    let transactions = db::load_transactions(conn)?;
    let filter = filter_from_args(sub, now)?;
    let mut matched = sorted_by_date_desc(filter_transactions(&transactions, &filter));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }
    Ok(matched.into_iter().map(TransactionRow::from).collect())
}
