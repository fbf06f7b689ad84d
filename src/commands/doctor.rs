// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Transaction, TxKind};
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

/// One row per problem: (issue, detail).
pub fn issues(txs: &[Transaction]) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for t in txs {
        // 1) Amounts the engine will count as zero
        if t.amount.value().is_none() {
            rows.push((
                "malformed_amount".into(),
                format!("#{} {} '{}'", t.id, t.date, t.amount.to_text()),
            ));
        }
        // 2) Negative amounts; the sign is carried by the type
        if matches!(t.amount.value(), Some(d) if d < Decimal::ZERO) {
            rows.push((
                "negative_amount".into(),
                format!("#{} {} {}", t.id, t.date, t.amount.to_text()),
            ));
        }
        // 3) Types that count towards nothing
        if t.kind == TxKind::Unknown {
            rows.push(("unknown_type".into(), format!("#{} {}", t.id, t.date)));
        }
        // 4) Reserved flag on an expense is ignored
        if t.kind == TxKind::Expense && t.reserved {
            rows.push(("reserved_expense".into(), format!("#{} {}", t.id, t.date)));
        }
    }
    rows
}

pub fn handle(conn: &Connection) -> Result<()> {
    let txs = db::all_transactions(conn)?;
    let rows: Vec<Vec<String>> = issues(&txs)
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
