// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::MaturedReserve;
use crate::utils::{get_setting, pretty_table, set_setting, SETTINGS};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            println!("{}", get_setting(conn, key)?);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            set(conn, key, value)?;
            println!("{} = {}", key, value);
        }
        Some(("list", _)) => {
            let mut data = Vec::new();
            for (key, _) in SETTINGS {
                data.push(vec![key.to_string(), get_setting(conn, key)?]);
            }
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}

/// Validates values that other commands parse later.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if key == "matured_reserve" {
        value.parse::<MaturedReserve>()?;
    }
    set_setting(conn, key, value.trim())
}
