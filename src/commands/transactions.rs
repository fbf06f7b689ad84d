// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, TxFilter};
use crate::engine::Aggregator;
use crate::models::{Amount, Transaction, TxKind};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, agg: &Aggregator, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, agg, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TxKind> {
    match TxKind::from_wire(s) {
        (TxKind::Unknown, _) => Err(anyhow!("Unknown type '{}', expected income or expense", s)),
        (k, _) => Ok(k),
    }
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Amount must not be negative, got {}", amount));
    }
    Ok(amount)
}

fn non_empty(sub: &clap::ArgMatches, key: &str) -> Option<String> {
    sub.get_one::<String>(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Builds a transaction from `tx add` arguments.
pub fn from_args(sub: &clap::ArgMatches) -> Result<Transaction> {
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let kind = parse_kind(sub.get_one::<String>("type").context("--type is required")?)?;
    let amount = parse_amount(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let reserved = sub.get_flag("reserved");
    if reserved && kind != TxKind::Income {
        return Err(anyhow!("Only income can be reserved"));
    }
    Ok(Transaction {
        id: 0,
        date,
        kind,
        title: non_empty(sub, "title").unwrap_or_default(),
        category: non_empty(sub, "category").unwrap_or_default(),
        amount: Amount::Value(amount),
        reserved,
        description: non_empty(sub, "description"),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx = from_args(sub)?;
    let id = db::insert_transaction(conn, &tx)?;
    println!(
        "Recorded {} {} on {} (id {}){}",
        tx.kind,
        tx.amount.to_text(),
        tx.date,
        id,
        if tx.reserved { ", reserved" } else { "" }
    );
    Ok(())
}

/// Applies `tx edit` arguments to the stored transaction.
pub fn apply_edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<Transaction> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    let mut tx = db::get_transaction(conn, id)?
        .with_context(|| format!("Transaction {} not found", id))?;

    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_date(d)?;
    }
    if let Some(k) = sub.get_one::<String>("type") {
        tx.kind = parse_kind(k)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = Amount::Value(parse_amount(a)?);
    }
    if let Some(c) = sub.get_one::<String>("category") {
        tx.category = c.trim().to_string();
    }
    if let Some(t) = sub.get_one::<String>("title") {
        tx.title = t.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("description") {
        tx.description = Some(d.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(r) = sub.get_one::<bool>("reserved") {
        tx.reserved = *r;
    }
    if tx.reserved && tx.kind != TxKind::Income {
        return Err(anyhow!("Only income can be reserved"));
    }

    db::update_transaction(conn, &tx)?;
    Ok(tx)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx = apply_edit(conn, sub)?;
    println!("Updated transaction {}", tx.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    if !db::delete_transaction(conn, id)? {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, agg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Title", "Category", "Amount", "Type"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub category: String,
    pub amount: String,
    /// `income`, `expense`, or `reserved` while the date is still ahead.
    pub status: String,
    pub description: String,
}

pub fn query_rows(
    conn: &Connection,
    agg: &Aggregator,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let filter = TxFilter {
        month: sub.get_one::<String>("month").map(|s| parse_month(s)).transpose()?,
        kind: sub.get_one::<String>("type").map(|s| parse_kind(s)).transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let txs = db::list_transactions(conn, &filter)?;
    let data = txs
        .into_iter()
        .map(|t| {
            let status = if agg.classify(&t).reserved {
                "reserved".to_string()
            } else {
                t.kind.to_string()
            };
            TransactionRow {
                id: t.id,
                date: t.date.to_string(),
                title: t.title,
                category: t.category,
                amount: t.amount.to_text(),
                status,
                description: t.description.unwrap_or_default(),
            }
        })
        .collect();
    Ok(data)
}
