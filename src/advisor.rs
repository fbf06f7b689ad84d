// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canned answers about the current figures, picked by keyword.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{CategoryTotal, Overview, Summary};
use crate::utils::fmt_money;

pub const GREETING: &str = "Hello! I am your budget advisor. How can I help you today?";
pub const HELP: &str = "I can tell you about your income, expenses, reserved savings, \
balance or top spending category.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Reserved,
    TopCategory,
    Expenses,
    Income,
    Balance,
    Overview,
}

// First match wins, so the narrower topics come first.
const PATTERNS: &[(&str, Topic)] = &[
    (r"(?i)\b(reserved?|savings?|saved?|set aside)\b", Topic::Reserved),
    (r"(?i)\b(categor(y|ies)|where|most|biggest|top)\b", Topic::TopCategory),
    (r"(?i)\b(expenses?|spen[dt]|spending|costs?|outflow)\b", Topic::Expenses),
    (r"(?i)\b(income|earn(ed|ings)?|salary|made)\b", Topic::Income),
    (r"(?i)\b(balance|left|remaining|afford)\b", Topic::Balance),
    (r"(?i)\b(summary|overview|status|doing)\b", Topic::Overview),
    (r"(?i)^\s*(hi|hello|hey)\b", Topic::Greeting),
];

static TABLE: Lazy<Vec<(Regex, Topic)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .filter_map(|(p, t)| Regex::new(p).ok().map(|re| (re, *t)))
        .collect()
});

/// The figures the advisor may quote.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
}

impl From<Overview> for Snapshot {
    fn from(o: Overview) -> Self {
        Snapshot {
            summary: o.summary,
            categories: o.categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub topic: Option<Topic>,
    pub text: String,
}

pub fn topic_for(question: &str) -> Option<Topic> {
    TABLE
        .iter()
        .find(|(re, _)| re.is_match(question))
        .map(|(_, t)| *t)
}

pub fn respond(question: &str, snap: &Snapshot, currency: &str) -> Reply {
    if question.trim().is_empty() {
        return Reply {
            topic: Some(Topic::Greeting),
            text: GREETING.to_string(),
        };
    }
    let topic = topic_for(question);
    let text = match topic {
        Some(t) => message(t, snap, currency),
        None => HELP.to_string(),
    };
    Reply { topic, text }
}

fn message(topic: Topic, snap: &Snapshot, ccy: &str) -> String {
    let s = &snap.summary;
    match topic {
        Topic::Greeting => GREETING.to_string(),
        Topic::Income => format!(
            "Your total income so far is {}.",
            fmt_money(&s.total_income, ccy)
        ),
        Topic::Expenses => format!(
            "You have spent {} in total.",
            fmt_money(&s.total_expenses, ccy)
        ),
        Topic::Reserved => format!(
            "You have {} reserved for future dates. It counts as income once its date arrives.",
            fmt_money(&s.reserved_savings, ccy)
        ),
        Topic::Balance if s.raw_balance < Decimal::ZERO => format!(
            "Your expenses exceed your income by {}. Your available balance is {}.",
            fmt_money(&-s.raw_balance, ccy),
            fmt_money(&s.total_balance, ccy)
        ),
        Topic::Balance => format!(
            "Your available balance is {}.",
            fmt_money(&s.total_balance, ccy)
        ),
        Topic::TopCategory => match snap.categories.first() {
            Some(top) => format!(
                "Your biggest expense category is {} at {}.",
                top.category,
                fmt_money(&top.total, ccy)
            ),
            None => "You have no expenses recorded yet.".to_string(),
        },
        Topic::Overview => format!(
            "Income {}, expenses {}, reserved {}, balance {}.",
            fmt_money(&s.total_income, ccy),
            fmt_money(&s.total_expenses, ccy),
            fmt_money(&s.reserved_savings, ccy),
            fmt_money(&s.total_balance, ccy)
        ),
    }
}
