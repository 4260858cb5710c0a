// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Transaction, TransactionKind};
use crate::utils::{opt_str, parse_amount, parse_date};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::io::Read;

/// Parses rows in the export layout (`Date,Type,Category,Description,Amount`).
/// Any category string is accepted.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(input);
    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 2;
        let rec = result.with_context(|| format!("Read CSV row {}", row))?;
        let field = |i: usize, name: &str| -> Result<String> {
            Ok(rec
                .get(i)
                .with_context(|| format!("{} missing on row {}", name, row))?
                .trim()
                .to_string())
        };
        let date = parse_date(&field(0, "date")?).with_context(|| format!("Row {}", row))?;
        let kind: TransactionKind = field(1, "type")?
            .parse()
            .with_context(|| format!("Row {}", row))?;
        let category = field(2, "category")?;
        let description = field(3, "description")?;
        let amount = parse_amount(&field(4, "amount")?).with_context(|| format!("Row {}", row))?;
        out.push(Transaction {
            id: String::new(),
            kind,
            amount,
            category,
            description: description.trim_matches('"').to_string(),
            date: date.to_string(),
            receipt: None,
            recurring: None,
        });
    }
    Ok(out)
}

/// Imports every row or none of them.
pub fn import_transactions<R: Read>(conn: &mut Connection, input: R) -> Result<usize> {
    let rows = read_csv(input)?;
    let tx = conn.transaction()?;
    for t in &rows {
        db::insert_transaction(&tx, t)?;
    }
    tx.commit()?;
    log::debug!("imported {} transactions", rows.len());
    Ok(rows.len())
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let path = opt_str(m, "path").context("path missing")?;
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let n = import_transactions(conn, file)?;
    println!("Imported {} transactions from {}", n, path);
    Ok(())
}
