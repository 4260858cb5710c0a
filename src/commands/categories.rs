// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::{
    active_categories, add_custom_category, category_color, is_builtin, remove_custom_category,
};
use crate::db;
use crate::models::TransactionKind;
use crate::utils::{opt_str, parse_amount, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

fn kind_of(sub: &clap::ArgMatches) -> Result<TransactionKind> {
    Ok(opt_str(sub, "type").context("type missing")?.parse()?)
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = kind_of(sub)?;
            let name = opt_str(sub, "name").context("name missing")?;
            let budget = opt_str(sub, "budget").map(parse_amount).transpose()?;
            let mut settings = db::load_settings(conn)?;
            let entry =
                add_custom_category(&mut settings, kind, name, opt_str(sub, "color"), budget)?;
            db::save_settings(conn, &settings)?;
            if let Some(limit) = entry.budget.filter(|b| !b.is_zero()) {
                let mut budgets = db::load_budgets(conn)?;
                budgets.category_limits.insert(entry.name.clone(), limit);
                db::save_budgets(conn, &budgets)?;
            }
            println!("Added {} category '{}'", kind, entry.name);
        }
        Some(("list", sub)) => {
            let kind = kind_of(sub)?;
            let settings = db::load_settings(conn)?;
            let budgets = db::load_budgets(conn)?;
            let data = active_categories(&settings, kind)
                .into_iter()
                .map(|name| {
                    let origin = if is_builtin(kind, &name) { "built-in" } else { "custom" };
                    let limit = match kind {
                        TransactionKind::Expense => format!("{:.2}", budgets.limit_for(&name)),
                        TransactionKind::Income => String::new(),
                    };
                    vec![
                        name.clone(),
                        category_color(&settings, &name),
                        limit,
                        origin.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Category", "Color", "Budget", "Origin"], data)
            );
        }
        Some(("rm", sub)) => {
            let kind = kind_of(sub)?;
            let name = opt_str(sub, "name").context("name missing")?;
            let mut settings = db::load_settings(conn)?;
            let removed = remove_custom_category(&mut settings, kind, name)?;
            db::save_settings(conn, &settings)?;
            println!("Removed {} category '{}'", kind, removed.name);
        }
        _ => {}
    }
    Ok(())
}
