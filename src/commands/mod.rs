// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advisor;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod reports;
pub mod sync;
pub mod transactions;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::engine::{Aggregator, MaturedReserve};
use crate::models::Transaction;
use crate::source::{ApiSource, JsonFileSource, SqliteSource, TransactionSource, TOKEN_ENV};
use crate::utils::{get_setting, http_client};

/// Builds the one aggregator used for the whole invocation. `today` comes from
/// `--today`, else the local calendar date, read once here.
pub fn aggregator(conn: &Connection, m: &clap::ArgMatches) -> Result<Aggregator> {
    let today = match m.get_one::<String>("today") {
        Some(s) => s.clone(),
        None => chrono::Local::now().date_naive().to_string(),
    };
    let policy = match m.get_one::<String>("matured-reserve") {
        Some(p) => p.clone(),
        None => get_setting(conn, "matured_reserve")?,
    };
    let policy: MaturedReserve = policy.parse()?;
    Ok(Aggregator::new(&today)?.with_policy(policy))
}

pub fn api_source(conn: &Connection) -> Result<ApiSource> {
    let token = std::env::var(TOKEN_ENV)
        .with_context(|| format!("{} is not set; log in and export your token", TOKEN_ENV))?;
    let base = get_setting(conn, "api_url")?;
    Ok(ApiSource::new(http_client()?, &base, &token))
}

/// Reads transactions from the source chosen with `--source`.
pub fn load_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let which = sub
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or("local");
    let txs = match which {
        "api" => api_source(conn)?
            .fetch()
            .context("Could not fetch transactions from the API")?,
        "file" => {
            let path = sub
                .get_one::<String>("file")
                .context("--file is required with --source file")?;
            JsonFileSource::new(path)
                .fetch()
                .with_context(|| format!("Read transactions from {}", path))?
        }
        _ => SqliteSource::new(conn).fetch()?,
    };
    Ok(txs)
}
