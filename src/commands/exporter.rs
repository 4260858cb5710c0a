// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::filter::sorted_by_date_desc;
use crate::models::Transaction;
use crate::utils::opt_str;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rusqlite::Connection;
use std::fs::File;
use std::io::Write;

pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

pub fn export_filename(date: NaiveDate) -> String {
    format!("budget-export-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export format: the description is wrapped in double quotes and
/// nothing else is quoted or escaped.
pub fn write_csv<W: Write>(out: W, transactions: &[&Transaction]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    wtr.write_record(CSV_HEADERS)?;
    for t in transactions {
        wtr.write_record([
            t.date.clone(),
            t.kind.to_string(),
            t.category.clone(),
            format!("\"{}\"", t.description),
            t.amount.normalize().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let out = opt_str(m, "out")
        .map(str::to_string)
        .unwrap_or_else(|| export_filename(now.date()));
    let transactions = db::load_transactions(conn)?;
    let ordered = sorted_by_date_desc(transactions.iter().collect());
    let file = File::create(&out).with_context(|| format!("Create {}", out))?;
    write_csv(file, &ordered)?;
    println!("Exported {} transactions to {}", ordered.len(), out);
    Ok(())
}
