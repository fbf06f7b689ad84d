// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::PathBuf;

use crate::models::{Amount, Transaction, TxKind};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Budgetwise", "budgetwise"));

/// `BUDGETWISE_DB` overrides the platform data directory.
pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("BUDGETWISE_DB") {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("budgetwise.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
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
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL,
        reserved INTEGER NOT NULL DEFAULT 0,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    -- per-user documents, e.g. budgetwise_goals_<user>
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub month: Option<(i32, u32)>,
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

const SELECT_TX: &str =
    "SELECT id, date, type, title, category, amount, reserved, description FROM transactions";

fn row_to_tx(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind: String = r.get(2)?;
    let (kind, implied_reserved) = TxKind::from_wire(&kind);
    let amount: String = r.get(5)?;
    let reserved: bool = r.get(6)?;
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get::<_, NaiveDate>(1)?,
        kind,
        title: r.get(3)?,
        category: r.get(4)?,
        amount: Amount::from_text(&amount),
        reserved: reserved || implied_reserved,
        description: r.get(7)?,
    })
}

/// Stores `tx`. A non-positive id lets SQLite assign one.
pub fn insert_transaction(conn: &Connection, tx: &Transaction) -> rusqlite::Result<i64> {
    let id = (tx.id > 0).then_some(tx.id);
    conn.execute(
        "INSERT INTO transactions(id, date, type, title, category, amount, reserved, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            tx.date,
            tx.kind.as_str(),
            tx.title,
            tx.category,
            tx.amount.to_text(),
            tx.reserved,
            tx.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    conn.query_row(
        &format!("{} WHERE id=?1", SELECT_TX),
        params![id],
        row_to_tx,
    )
    .optional()
}

/// Returns false when no row has `tx.id`.
pub fn update_transaction(conn: &Connection, tx: &Transaction) -> rusqlite::Result<bool> {
    let n = conn.execute(
        "UPDATE transactions
         SET date=?2, type=?3, title=?4, category=?5, amount=?6, reserved=?7, description=?8
         WHERE id=?1",
        params![
            tx.id,
            tx.date,
            tx.kind.as_str(),
            tx.title,
            tx.category,
            tx.amount.to_text(),
            tx.reserved,
            tx.description
        ],
    )?;
    Ok(n > 0)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

/// Newest first.
pub fn list_transactions(conn: &Connection, f: &TxFilter) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!("{} WHERE 1=1", SELECT_TX);
    let mut params_vec: Vec<String> = Vec::new();

    if let Some((y, m)) = f.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(format!("{:04}-{:02}", y, m));
    }
    if let Some(kind) = f.kind {
        sql.push_str(" AND lower(type)=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(cat) = &f.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.clone());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = f.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), row_to_tx)?;
    let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(data)
}

pub fn all_transactions(conn: &Connection) -> rusqlite::Result<Vec<Transaction>> {
    list_transactions(conn, &TxFilter::default())
}

/// Replaces every stored transaction with `txs`, atomically.
pub fn replace_all(conn: &mut Connection, txs: &[Transaction]) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM transactions", [])?;
    for t in txs {
        insert_transaction(&tx, t)?;
    }
    tx.commit()?;
    Ok(txs.len())
}
