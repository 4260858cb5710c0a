// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use spendwise::{cli, commands, db, utils};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let now = utils::local_now();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub, now)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub, now)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub, now)?,
        Some(("insights", sub)) => commands::insights::handle(&conn, sub, now)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub, now)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub, now)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("reset", sub)) => {
            if !utils::flag(sub, "yes") {
                bail!("Refusing to reset without --yes");
            }
            db::reset(&mut conn)?;
            println!("All transactions and goals deleted; budgets restored to defaults");
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
