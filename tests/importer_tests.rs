// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::commands::importer::import_file;
use budgetwise::db;
use budgetwise::engine::Aggregator;
use budgetwise::models::{Amount, Transaction, TxKind};
use budgetwise::source::{JsonFileSource, TransactionSource};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal_macros::dec;
use std::fs;
use tempfile::tempdir;

const API_DUMP: &str = r#"[
  {"id": 11, "date": "2025-05-01", "type": "income", "title": "Salary", "category": "Salary", "amount": 1000.0, "description": null, "reserved": false},
  {"id": 12, "date": "2025-05-03", "type": "expense", "title": "Groceries", "category": "Food", "amount": 300, "description": "weekly"},
  {"id": 13, "date": "2025-05-20", "type": "reserved", "title": "Rainy day", "category": "Savings", "amount": "500"},
  {"id": 14, "date": "2025-05-04", "type": "expense", "title": "Cab", "category": "Transport", "amount": "abc"}
]"#;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn json_file_source_reads_api_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    fs::write(&path, API_DUMP).unwrap();

    let txs = JsonFileSource::new(&path).fetch().unwrap();
    assert_eq!(txs.len(), 4);
    assert_eq!(txs[1].description.as_deref(), Some("weekly"));
    assert_eq!(txs[2].kind, TxKind::Income);
    assert!(txs[2].reserved);
    assert_eq!(txs[3].amount.value(), None);
}

#[test]
fn json_file_source_fails_whole_on_bad_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    fs::write(&path, r#"[{"id": 1, "date": "not a date", "type": "income"}]"#).unwrap();
    assert!(JsonFileSource::new(&path).fetch().is_err());
    assert!(JsonFileSource::new(dir.path().join("missing.json")).fetch().is_err());
}

#[test]
fn import_replace_keeps_ids_and_figures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    fs::write(&path, API_DUMP).unwrap();

    let mut conn = setup();
    let n = import_file(&mut conn, path.to_str().unwrap(), true).unwrap();
    assert_eq!(n, 4);

    let stored = db::get_transaction(&conn, 13).unwrap().unwrap();
    assert_eq!(stored.kind, TxKind::Income);
    assert!(stored.reserved);

    let txs = db::all_transactions(&conn).unwrap();
    let s = Aggregator::new("2025-05-10").unwrap().summarize(&txs);
    assert_eq!(s.total_income, dec!(1000));
    assert_eq!(s.total_expenses, dec!(300));
    assert_eq!(s.reserved_savings, dec!(500));
    assert_eq!(s.diagnostics.malformed_amounts, 1);
    assert_eq!(s.diagnostics.flagged_ids, vec![14]);
}

#[test]
fn import_append_assigns_new_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    fs::write(&path, API_DUMP).unwrap();

    let mut conn = setup();
    let existing = Transaction {
        id: 0,
        date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        kind: TxKind::Expense,
        title: "Rent".into(),
        category: "Rent".into(),
        amount: Amount::Value(dec!(900)),
        reserved: false,
        description: None,
    };
    db::insert_transaction(&conn, &existing).unwrap();

    import_file(&mut conn, path.to_str().unwrap(), false).unwrap();
    import_file(&mut conn, path.to_str().unwrap(), false).unwrap();
    assert_eq!(db::all_transactions(&conn).unwrap().len(), 9);
}
