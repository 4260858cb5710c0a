// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::models::{BudgetConfig, SavingsGoal, Transaction, UserSettings};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.spendwise", "Spendwise", "spendwise"));

pub const DB_ENV: &str = "SPENDWISE_DB";
const SETTINGS_KEY: &str = "user_settings";
const BUDGETS_KEY: &str = "budgets";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    log::debug!("opened database at {}", path.display());
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL,
        receipt TEXT,
        recurring TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS goals(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL,
        deadline TEXT NOT NULL,
        color TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

/// Everything the analytics engine needs for one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub goals: Vec<SavingsGoal>,
    pub budgets: BudgetConfig,
    pub settings: UserSettings,
}

pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    let snapshot = Snapshot {
        transactions: load_transactions(conn)?,
        goals: load_goals(conn)?,
        budgets: load_budgets(conn)?,
        settings: load_settings(conn)?,
    };
    log::debug!(
        "loaded snapshot: {} transactions, {} goals",
        snapshot.transactions.len(),
        snapshot.goals.len()
    );
    Ok(snapshot)
}

/// Ids are never handed out twice, so a removed record can always be restored
/// under its original id.
fn next_id(conn: &Connection, counter_key: &str, floor_sql: &str) -> Result<String> {
    let floor: i64 = conn.query_row(floor_sql, [], |r| r.get(0))?;
    let stored = get_setting(conn, counter_key)?.and_then(|s| s.parse::<i64>().ok());
    let n = stored.unwrap_or(0).max(floor);
    set_setting(conn, counter_key, &(n + 1).to_string())?;
    Ok(n.to_string())
}

// Transactions

const TX_COLUMNS: &str = "id, type, amount, category, description, date, receipt, recurring";

type RawTransaction = (
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
);

fn raw_transaction(r: &Row<'_>) -> rusqlite::Result<RawTransaction> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
    ))
}

fn decode_transaction(raw: RawTransaction) -> Result<Transaction> {
    let (id, kind, amount, category, description, date, receipt, recurring) = raw;
    Ok(Transaction {
        kind: kind.parse()?,
        amount: amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transaction {}", amount, id))?,
        recurring: recurring.as_deref().map(str::parse).transpose()?,
        id,
        category,
        description,
        date,
        receipt,
    })
}

/// All transactions in stored order. Rows that cannot be decoded are skipped.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TX_COLUMNS} FROM transactions ORDER BY rowid"
    ))?;
    let rows = stmt.query_map([], raw_transaction)?;
    let mut out = Vec::new();
    for row in rows {
        match decode_transaction(row?) {
            Ok(t) => out.push(t),
            Err(err) => log::warn!("skipping stored transaction: {:#}", err),
        }
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let raw = conn
        .query_row(
            &format!("SELECT {TX_COLUMNS} FROM transactions WHERE id=?1"),
            params![id],
            raw_transaction,
        )
        .optional()?;
    raw.map(decode_transaction).transpose()
}

/// Inserts `t`, generating an id when it has none. Returns the id used.
pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<String> {
    let id = if t.id.trim().is_empty() {
        next_id(
            conn,
            "next_transaction_id",
            "SELECT IFNULL(MAX(rowid),0)+1 FROM transactions",
        )?
    } else {
        t.id.clone()
    };
    conn.execute(
        "INSERT INTO transactions(id, type, amount, category, description, date, receipt, recurring)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            t.kind.as_str(),
            t.amount.to_string(),
            t.category,
            t.description,
            t.date,
            t.receipt,
            t.recurring.map(|r| r.as_str())
        ],
    )
    .with_context(|| format!("Insert transaction {}", id))?;
    log::debug!("inserted transaction {}", id);
    Ok(id)
}

pub fn update_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    let n = conn.execute(
        "UPDATE transactions SET type=?2, amount=?3, category=?4, description=?5, date=?6,
         receipt=?7, recurring=?8 WHERE id=?1",
        params![
            t.id,
            t.kind.as_str(),
            t.amount.to_string(),
            t.category,
            t.description,
            t.date,
            t.receipt,
            t.recurring.map(|r| r.as_str())
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", t.id));
    }
    Ok(())
}

/// Removes a transaction and hands back the removed record.
pub fn delete_transaction(conn: &Connection, id: &str) -> Result<Option<Transaction>> {
    let existing = get_transaction(conn, id)?;
    if existing.is_some() {
        conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        log::debug!("deleted transaction {}", id);
    }
    Ok(existing)
}

// Goals

const GOAL_COLUMNS: &str = "id, name, target_amount, current_amount, deadline, color";

type RawGoal = (String, String, String, String, String, String);

fn raw_goal(r: &Row<'_>) -> rusqlite::Result<RawGoal> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?))
}

fn decode_goal(raw: RawGoal) -> Result<SavingsGoal> {
    let (id, name, target, current, deadline, color) = raw;
    Ok(SavingsGoal {
        target_amount: target
            .parse::<Decimal>()
            .with_context(|| format!("Invalid target '{}' for goal {}", target, id))?,
        current_amount: current
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' for goal {}", current, id))?,
        deadline: NaiveDate::parse_from_str(&deadline, "%Y-%m-%d")
            .with_context(|| format!("Invalid deadline '{}' for goal {}", deadline, id))?,
        id,
        name,
        color,
    })
}

pub fn load_goals(conn: &Connection) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(&format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY rowid"))?;
    let rows = stmt.query_map([], raw_goal)?;
    let mut out = Vec::new();
    for row in rows {
        match decode_goal(row?) {
            Ok(g) => out.push(g),
            Err(err) => log::warn!("skipping stored goal: {:#}", err),
        }
    }
    Ok(out)
}

pub fn get_goal(conn: &Connection, id: &str) -> Result<Option<SavingsGoal>> {
    let raw = conn
        .query_row(
            &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id=?1"),
            params![id],
            raw_goal,
        )
        .optional()?;
    raw.map(decode_goal).transpose()
}

pub fn insert_goal(conn: &Connection, g: &SavingsGoal) -> Result<String> {
    let id = if g.id.trim().is_empty() {
        next_id(conn, "next_goal_id", "SELECT IFNULL(MAX(rowid),0)+1 FROM goals")?
    } else {
        g.id.clone()
    };
    conn.execute(
        "INSERT INTO goals(id, name, target_amount, current_amount, deadline, color)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id,
            g.name,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.deadline.to_string(),
            g.color
        ],
    )
    .with_context(|| format!("Insert goal {}", id))?;
    Ok(id)
}

pub fn update_goal(conn: &Connection, g: &SavingsGoal) -> Result<()> {
    let n = conn.execute(
        "UPDATE goals SET name=?2, target_amount=?3, current_amount=?4, deadline=?5, color=?6
         WHERE id=?1",
        params![
            g.id,
            g.name,
            g.target_amount.to_string(),
            g.current_amount.to_string(),
            g.deadline.to_string(),
            g.color
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Goal '{}' not found", g.id));
    }
    Ok(())
}

pub fn delete_goal(conn: &Connection, id: &str) -> Result<bool> {
    Ok(conn.execute("DELETE FROM goals WHERE id=?1", params![id])? > 0)
}

// Settings

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn load_settings(conn: &Connection) -> Result<UserSettings> {
    match get_setting(conn, SETTINGS_KEY)? {
        Some(s) => serde_json::from_str(&s).context("Invalid stored user settings"),
        None => Ok(UserSettings::default()),
    }
}

pub fn save_settings(conn: &Connection, settings: &UserSettings) -> Result<()> {
    set_setting(conn, SETTINGS_KEY, &serde_json::to_string(settings)?)
}

pub fn load_budgets(conn: &Connection) -> Result<BudgetConfig> {
    match get_setting(conn, BUDGETS_KEY)? {
        Some(s) => serde_json::from_str(&s).context("Invalid stored budget configuration"),
        None => Ok(BudgetConfig::default()),
    }
}

pub fn save_budgets(conn: &Connection, budgets: &BudgetConfig) -> Result<()> {
    set_setting(conn, BUDGETS_KEY, &serde_json::to_string(budgets)?)
}

/// Drops all transactions and goals and restores default budgets.
/// User settings are left alone.
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM transactions", [])?;
    tx.execute("DELETE FROM goals", [])?;
    tx.execute("DELETE FROM settings WHERE key=?1", params![BUDGETS_KEY])?;
    tx.commit()?;
    log::debug!("cleared transactions, goals and budgets");
    Ok(())
}
