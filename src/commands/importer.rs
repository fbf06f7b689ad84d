// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::source::{JsonFileSource, TransactionSource};
use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let replace = sub.get_flag("replace");
    let n = import_file(conn, path, replace)?;
    println!("Imported {} transactions from {}", n, path);
    Ok(())
}

/// Loads a JSON export of the API into the local store. Ids from the file are
/// kept unless `replace` is false, in which case new ids are assigned so
/// existing rows are never overwritten.
pub fn import_file(conn: &mut Connection, path: &str, replace: bool) -> Result<usize> {
    let mut txs = JsonFileSource::new(path)
        .fetch()
        .with_context(|| format!("Read transactions from {}", path))?;

    if replace {
        let n = db::replace_all(conn, &txs)?;
        info!(count = n, path, "replaced local transactions");
        return Ok(n);
    }

    let tx = conn.transaction()?;
    for t in txs.iter_mut() {
        t.id = 0;
        db::insert_transaction(&tx, t)?;
    }
    tx.commit()?;
    info!(count = txs.len(), path, "appended transactions");
    Ok(txs.len())
}
