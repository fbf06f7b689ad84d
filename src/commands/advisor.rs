// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::advisor::{respond, Reply, Snapshot};
use crate::commands::load_transactions;
use crate::engine::Aggregator;
use crate::utils::get_currency;

pub fn handle(conn: &Connection, agg: &Aggregator, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("ask", sub)) = m.subcommand() {
        let reply = ask(conn, agg, sub)?;
        println!("{}", reply.text);
    }
    Ok(())
}

pub fn ask(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<Reply> {
    let question = sub
        .get_many::<String>("text")
        .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let txs = load_transactions(conn, sub)?;
    let snap = Snapshot::from(agg.overview(&txs));
    Ok(respond(&question, &snap, &get_currency(conn)?))
}
