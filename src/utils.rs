// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationError;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Evaluation instant for a command run.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Largest amount accepted from user input.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Parses a user-entered amount; only non-negative decimals pass.
pub fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let raw = s.trim();
    let d = raw
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;
    check_amount(d)
}

/// Bounds an amount to what the analytics can always sum: non-negative,
/// cents precision, at most [`MAX_AMOUNT`].
pub fn check_amount(d: Decimal) -> Result<Decimal, ValidationError> {
    if d.is_sign_negative() && !d.is_zero() {
        return Err(ValidationError::NegativeAmount(d.to_string()));
    }
    let d = d.normalize();
    if d.scale() > MAX_AMOUNT_SCALE || d > MAX_AMOUNT {
        return Err(ValidationError::AmountOutOfRange(d.to_string()));
    }
    Ok(d)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, d)
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.0}%", d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Reads a flag that may not be defined on every subcommand.
pub fn flag(m: &clap::ArgMatches, id: &str) -> bool {
    m.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}

pub fn opt_str<'a>(m: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    m.try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
