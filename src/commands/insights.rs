// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::currency_symbol;
use crate::db;
use crate::engine::insights::{Insight, InsightKind, MAX_DISPLAYED_INSIGHTS, generate_insights};
use crate::utils::{flag, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;

pub const EMPTY_STATE: &str =
    "Add more transactions to see personalized spending insights and tips.";

pub fn current_insights(conn: &Connection, now: NaiveDateTime) -> Result<Vec<Insight>> {
    let snapshot = db::load_snapshot(conn)?;
    let sym = currency_symbol(&snapshot.settings.currency);
    let insights = generate_insights(&snapshot.transactions, &snapshot.budgets, now, sym);
    log::debug!("{} insights for {}", insights.len(), now.date());
    Ok(insights)
}

fn label(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "warning",
        InsightKind::Success => "success",
        InsightKind::Info => "info",
        InsightKind::Tip => "tip",
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let mut insights = current_insights(conn, now)?;
    if !flag(m, "all") {
        insights.truncate(MAX_DISPLAYED_INSIGHTS);
    }
    if maybe_print_json(flag(m, "json"), flag(m, "jsonl"), &insights)? {
        return Ok(());
    }
    if insights.is_empty() {
        println!("{}", EMPTY_STATE);
        return Ok(());
    }
    let rows = insights
        .into_iter()
        .map(|i| {
            vec![
                label(i.kind).to_string(),
                i.title,
                i.description,
                i.value.unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["", "Insight", "Detail", "Value"], rows));
    Ok(())
}
