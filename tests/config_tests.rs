// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::commands::{self, config, doctor};
use budgetwise::engine::MaturedReserve;
use budgetwise::{cli, db, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn settings_fall_back_to_defaults() {
    let conn = setup();
    assert_eq!(utils::get_currency(&conn).unwrap(), "₹");
    assert_eq!(utils::get_setting(&conn, "matured_reserve").unwrap(), "outflow");
    assert!(utils::get_setting(&conn, "colour").is_err());

    config::set(&conn, "currency", "$").unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "$");
}

#[test]
fn policy_setting_is_validated() {
    let conn = setup();
    assert!(config::set(&conn, "matured_reserve", "sometimes").is_err());
    config::set(&conn, "matured_reserve", "income").unwrap();
    assert!(config::set(&conn, "nope", "1").is_err());
}

#[test]
fn aggregator_takes_flags_over_settings() {
    let conn = setup();
    config::set(&conn, "matured_reserve", "income").unwrap();

    let m = cli::build_cli().get_matches_from(["budgetwise", "report", "summary", "--today", "2025-06-15"]);
    let agg = commands::aggregator(&conn, &m).unwrap();
    assert_eq!(agg.today().to_string(), "2025-06-15");
    assert_eq!(agg.policy(), MaturedReserve::Income);

    let m = cli::build_cli().get_matches_from([
        "budgetwise",
        "--matured-reserve",
        "outflow",
        "--today",
        "2025-06-15",
        "report",
        "summary",
    ]);
    assert_eq!(commands::aggregator(&conn, &m).unwrap().policy(), MaturedReserve::Outflow);
}

#[test]
fn bad_today_flag_is_an_error() {
    let conn = setup();
    let m = cli::build_cli().get_matches_from(["budgetwise", "--today", "June 5th", "doctor"]);
    assert!(commands::aggregator(&conn, &m).is_err());
}

#[test]
fn doctor_lists_data_problems() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date,type,category,amount,reserved) VALUES
            ('2025-01-01','expense','Food','x',0),
            ('2025-01-02','expense','Rent','-4',1),
            ('2025-01-03','gift','Other','5',0),
            ('2025-01-04','income','Salary','5',0);
        "#,
    )
    .unwrap();
    let txs = db::all_transactions(&conn).unwrap();
    let kinds: Vec<String> = doctor::issues(&txs).into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec!["unknown_type", "negative_amount", "reserved_expense", "malformed_amount"]
    );
}
