// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::api_source;
use crate::db;
use crate::source::TransactionSource;
use anyhow::{Context, Result};
use rusqlite::Connection;

/// Pulls the API's transactions and replaces the local copy. A failed fetch
/// leaves the local store untouched.
pub fn handle(conn: &mut Connection) -> Result<()> {
    let src = api_source(conn)?;
    let txs = src
        .fetch()
        .with_context(|| format!("Fetch {}", src.endpoint()))?;
    let n = db::replace_all(conn, &txs)?;
    println!("Synced {} transactions", n);
    Ok(())
}
