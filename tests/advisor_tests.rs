// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwise::advisor::{respond, topic_for, Snapshot, Topic, GREETING, HELP};
use budgetwise::engine::Aggregator;
use budgetwise::models::{Amount, Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn tx(id: i64, kind: TxKind, amount: Decimal, d: &str, category: &str, reserved: bool) -> Transaction {
    Transaction {
        id,
        date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        kind,
        title: String::new(),
        category: category.into(),
        amount: Amount::Value(amount),
        reserved,
        description: None,
    }
}

fn snapshot(txs: &[Transaction]) -> Snapshot {
    let agg = Aggregator::new("2025-06-15").unwrap();
    Snapshot {
        summary: agg.summarize(txs),
        categories: agg.category_breakdown(txs),
    }
}

fn sample() -> Snapshot {
    snapshot(&[
        tx(1, TxKind::Income, dec!(1000), "2025-06-01", "Salary", false),
        tx(2, TxKind::Expense, dec!(300), "2025-06-05", "Food", false),
        tx(3, TxKind::Expense, dec!(120), "2025-06-06", "Transport", false),
        tx(4, TxKind::Income, dec!(500), "2025-06-16", "Savings", true),
    ])
}

#[test]
fn keywords_pick_topics() {
    assert_eq!(topic_for("What is my INCOME?"), Some(Topic::Income));
    assert_eq!(topic_for("how much did I spend"), Some(Topic::Expenses));
    assert_eq!(topic_for("how much reserved income do I have"), Some(Topic::Reserved));
    assert_eq!(topic_for("How much can I save?"), Some(Topic::Reserved));
    assert_eq!(topic_for("where does my money go"), Some(Topic::TopCategory));
    assert_eq!(topic_for("what's my balance"), Some(Topic::Balance));
    assert_eq!(topic_for("give me a summary"), Some(Topic::Overview));
    assert_eq!(topic_for("hello there"), Some(Topic::Greeting));
    assert_eq!(topic_for("incomes"), None);
    assert_eq!(topic_for("tell me a joke"), None);
}

#[test]
fn replies_quote_the_figures() {
    let snap = sample();
    assert_eq!(
        respond("income?", &snap, "₹").text,
        "Your total income so far is ₹1000.00."
    );
    assert_eq!(
        respond("expenses", &snap, "₹").text,
        "You have spent ₹420.00 in total."
    );
    assert!(respond("savings", &snap, "₹").text.starts_with("You have ₹500.00 reserved"));
    assert_eq!(
        respond("top category", &snap, "$").text,
        "Your biggest expense category is Food at $300.00."
    );
    assert_eq!(
        respond("balance", &snap, "₹").text,
        "Your available balance is ₹580.00."
    );
}

#[test]
fn overdrawn_balance_is_explained() {
    let snap = snapshot(&[
        tx(1, TxKind::Income, dec!(100), "2025-06-01", "Salary", false),
        tx(2, TxKind::Expense, dec!(160), "2025-06-05", "Rent", false),
    ]);
    assert_eq!(
        respond("what is left", &snap, "₹").text,
        "Your expenses exceed your income by ₹60.00. Your available balance is ₹0.00."
    );
}

#[test]
fn blank_unknown_and_empty_data() {
    let snap = snapshot(&[]);
    let r = respond("   ", &snap, "₹");
    assert_eq!(r.topic, Some(Topic::Greeting));
    assert_eq!(r.text, GREETING);

    let r = respond("tell me a joke", &snap, "₹");
    assert_eq!(r.topic, None);
    assert_eq!(r.text, HELP);

    assert_eq!(
        respond("biggest category", &snap, "₹").text,
        "You have no expenses recorded yet."
    );
}
