// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{CURRENCIES, currency_symbol, is_known_currency};
use crate::db;
use crate::error::ValidationError;
use crate::models::UserSettings;
use crate::utils::{flag, is_valid_email, maybe_print_json, opt_str, pretty_table};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("currency", sub)) => {
            let code = opt_str(sub, "code").context("code missing")?;
            let settings = set_currency(conn, code)?;
            println!(
                "Currency set to {} ({})",
                settings.currency,
                currency_symbol(&settings.currency)
            );
        }
        Some(("email", sub)) => {
            let address = if flag(sub, "off") {
                None
            } else {
                Some(opt_str(sub, "address").context("pass --address or --off")?)
            };
            let settings = set_email_reports(conn, address)?;
            if settings.email_reports {
                println!("Monthly reports will be sent to {}", settings.report_email);
            } else {
                println!("Email reports disabled");
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn set_currency(conn: &Connection, code: &str) -> Result<UserSettings> {
    let code = code.trim().to_ascii_uppercase();
    if !is_known_currency(&code) {
        let known: Vec<&str> = CURRENCIES.iter().map(|c| c.code).collect();
        return Err(anyhow!(
            "Unknown currency '{}' (known: {})",
            code,
            known.join(", ")
        ));
    }
    let mut settings = db::load_settings(conn)?;
    settings.currency = code;
    db::save_settings(conn, &settings)?;
    Ok(settings)
}

/// `Some(address)` subscribes, `None` unsubscribes and keeps the address.
pub fn set_email_reports(conn: &Connection, address: Option<&str>) -> Result<UserSettings> {
    let mut settings = db::load_settings(conn)?;
    match address {
        Some(a) => {
            let a = a.trim();
            if !is_valid_email(a) {
                return Err(ValidationError::InvalidEmail(a.to_string()).into());
            }
            settings.email_reports = true;
            settings.report_email = a.to_string();
        }
        None => settings.email_reports = false,
    }
    db::save_settings(conn, &settings)?;
    Ok(settings)
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = db::load_settings(conn)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &settings)? {
        return Ok(());
    }
    let budgets = db::load_budgets(conn)?;
    let names = |cats: &[crate::models::CustomCategory]| {
        cats.iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rows = vec![
        vec![
            "Currency".to_string(),
            format!("{} ({})", settings.currency, currency_symbol(&settings.currency)),
        ],
        vec![
            "Email reports".to_string(),
            if settings.email_reports {
                settings.report_email.clone()
            } else {
                "off".to_string()
            },
        ],
        vec!["Monthly limit".to_string(), format!("{:.2}", budgets.global_limit)],
        vec![
            "Custom expense categories".to_string(),
            names(&settings.custom_expense_categories),
        ],
        vec![
            "Custom income categories".to_string(),
            names(&settings.custom_income_categories),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
