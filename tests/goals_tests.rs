// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::commands::goals::goal_rows;
use budgetwise::db;
use budgetwise::error::GoalError;
use budgetwise::goals::{self, GoalPatch, GoalStore, SqliteGoalStore};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn goals_are_scoped_per_user() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    goals::add_goal(&store, "alice", "Bike", "", 30, dec!(600)).unwrap();
    goals::add_goal(&store, "alice", "Trip", "Goa", 90, dec!(9000)).unwrap();
    goals::add_goal(&store, "bob", "Phone", "", 10, dec!(200)).unwrap();

    let alice = store.load("alice").unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[1].id, 2);
    assert_eq!(alice[1].description, "Goa");
    assert_eq!(store.load("bob").unwrap().len(), 1);
    assert!(store.load("carol").unwrap().is_empty());

    store.clear("alice").unwrap();
    assert!(store.load("alice").unwrap().is_empty());
    assert_eq!(store.load("bob").unwrap().len(), 1);
}

#[test]
fn saved_amount_is_clamped_to_target() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    let g = goals::add_goal(&store, "u", "Laptop", "", 20, dec!(1000)).unwrap();

    let g = goals::set_saved(&store, "u", g.id, dec!(1500)).unwrap();
    assert_eq!(g.saved_amount, dec!(1000));
    assert!(goals::progress(&g).completed);

    let g = goals::set_saved(&store, "u", g.id, dec!(-5)).unwrap();
    assert_eq!(g.saved_amount, dec!(0));
}

#[test]
fn edit_and_remove() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    let g = goals::add_goal(&store, "u", "Laptop", "", 20, dec!(1000)).unwrap();
    goals::set_saved(&store, "u", g.id, dec!(400)).unwrap();

    let patch = GoalPatch {
        target_amount: Some(dec!(1200)),
        days: Some(40),
        ..Default::default()
    };
    let g = goals::edit_goal(&store, "u", g.id, patch).unwrap();
    assert_eq!(g.title, "Laptop");
    assert_eq!(g.saved_amount, dec!(400));

    let rows = goal_rows(&store, "u").unwrap();
    assert_eq!(rows[0].progress.remaining, dec!(800));
    assert_eq!(rows[0].progress.per_day, dec!(20));

    goals::remove_goal(&store, "u", g.id).unwrap();
    assert!(matches!(
        goals::remove_goal(&store, "u", g.id),
        Err(GoalError::NotFound(_))
    ));
}

#[test]
fn shrinking_the_target_reclamps_saved() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    let g = goals::add_goal(&store, "u", "Car", "", 30, dec!(5000)).unwrap();
    goals::set_saved(&store, "u", g.id, dec!(1000)).unwrap();

    let patch = GoalPatch {
        target_amount: Some(dec!(0.0000000000000000000000000001)),
        ..Default::default()
    };
    let g = goals::edit_goal(&store, "u", g.id, patch).unwrap();
    assert_eq!(g.saved_amount, dec!(0.0000000000000000000000000001));

    let rows = goal_rows(&store, "u").unwrap();
    assert_eq!(rows[0].progress.percent, dec!(100));
    assert!(rows[0].progress.completed);

    // growing it again keeps what was saved
    let patch = GoalPatch {
        target_amount: Some(dec!(10)),
        ..Default::default()
    };
    let g = goals::edit_goal(&store, "u", g.id, patch).unwrap();
    assert_eq!(g.saved_amount, dec!(0.0000000000000000000000000001));
    assert!(!goal_rows(&store, "u").unwrap()[0].progress.completed);
}

#[test]
fn invalid_target_and_unknown_id() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    assert!(matches!(
        goals::add_goal(&store, "u", "Nothing", "", 5, dec!(0)),
        Err(GoalError::InvalidTarget)
    ));
    assert!(matches!(
        goals::set_saved(&store, "u", 7, dec!(1)),
        Err(GoalError::NotFound(7))
    ));
}

#[test]
fn stored_document_uses_the_user_key() {
    let conn = setup();
    let store = SqliteGoalStore::new(&conn);
    goals::add_goal(&store, "42", "Bike", "", 30, dec!(600)).unwrap();
    let raw: String = conn
        .query_row(
            "SELECT value FROM kv WHERE key='budgetwise_goals_42'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v[0]["title"], "Bike");
    assert!(v[0].get("targetAmount").is_some());
}
