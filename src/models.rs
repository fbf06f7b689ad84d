// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Income,
    Expense,
    /// A type string we do not recognise. Contributes to no aggregate.
    Unknown,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Unknown => "unknown",
        }
    }

    /// Reads a wire type. The second value is the implied reserved flag:
    /// the backend keeps a pending reserved income under type "reserved".
    pub fn from_wire(s: &str) -> (TxKind, bool) {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => (TxKind::Income, false),
            "expense" => (TxKind::Expense, false),
            "reserved" => (TxKind::Income, true),
            _ => (TxKind::Unknown, false),
        }
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An amount as it arrived. Anything that is not a decimal number (or a
/// numeric string) is kept verbatim so the engine can report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Value(Decimal),
    Raw(Value),
}

impl Amount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Value(d) => Some(*d),
            Amount::Raw(_) => None,
        }
    }

    /// Parses stored text, keeping unparseable input as a raw string.
    pub fn from_text(s: &str) -> Amount {
        match s.trim().parse::<Decimal>() {
            Ok(d) => Amount::Value(d),
            Err(_) => Amount::Raw(Value::String(s.to_string())),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Amount::Value(d) => d.to_string(),
            Amount::Raw(Value::String(s)) => s.clone(),
            Amount::Raw(Value::Null) => String::new(),
            Amount::Raw(v) => v.to_string(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Raw(Value::Null)
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount::Value(d)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireTransaction", into = "WireTransaction")]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TxKind,
    pub title: String,
    pub category: String,
    pub amount: Amount,
    pub reserved: bool,
    pub description: Option<String>,
}

impl Transaction {
    /// The reserved flag only means something on income.
    pub fn is_reserved_income(&self) -> bool {
        self.kind == TxKind::Income && self.reserved
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireTransaction {
    #[serde(default)]
    id: i64,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    amount: Amount,
    #[serde(default)]
    reserved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<WireTransaction> for Transaction {
    fn from(w: WireTransaction) -> Self {
        let (kind, implied_reserved) = TxKind::from_wire(&w.kind);
        Transaction {
            id: w.id,
            date: w.date,
            kind,
            title: w.title.unwrap_or_default(),
            category: w.category.unwrap_or_default(),
            amount: w.amount,
            reserved: w.reserved.unwrap_or(false) || implied_reserved,
            description: w.description.filter(|s| !s.is_empty()),
        }
    }
}

impl From<Transaction> for WireTransaction {
    fn from(t: Transaction) -> Self {
        WireTransaction {
            id: t.id,
            date: t.date,
            kind: t.kind.as_str().to_string(),
            title: Some(t.title),
            category: Some(t.category),
            amount: t.amount,
            reserved: Some(t.reserved),
            description: t.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub days: u32,
    pub target_amount: Decimal,
    #[serde(default)]
    pub saved_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_backend_payload() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":7,"date":"2025-03-01","type":"Income","title":"Pay","category":"Salary","amount":1000.0,"description":null,"reserved":false}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TxKind::Income);
        assert_eq!(tx.amount.value(), Some(dec!(1000)));
        assert!(!tx.reserved);
        assert_eq!(tx.description, None);
    }

    #[test]
    fn reserved_type_means_reserved_income() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":1,"date":"2025-03-01","type":"reserved","category":"Savings","amount":"250"}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TxKind::Income);
        assert!(tx.reserved);
        assert!(tx.is_reserved_income());
    }

    #[test]
    fn malformed_amounts_are_kept_raw() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":2,"date":"2025-03-01","type":"expense","amount":"twelve"}"#,
        )
        .unwrap();
        assert_eq!(tx.amount.value(), None);
        assert_eq!(tx.amount.to_text(), "twelve");

        let missing: Transaction =
            serde_json::from_str(r#"{"id":3,"date":"2025-03-01","type":"expense"}"#).unwrap();
        assert_eq!(missing.amount, Amount::Raw(Value::Null));
    }

    #[test]
    fn unknown_kind_is_preserved_as_unknown() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":4,"date":"2025-03-01","type":"transfer","amount":5}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TxKind::Unknown);
    }

    #[test]
    fn reserved_flag_on_expense_is_not_reserved_income() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":5,"date":"2025-03-01","type":"expense","amount":5,"reserved":true}"#,
        )
        .unwrap();
        assert!(tx.reserved);
        assert!(!tx.is_reserved_income());
    }
}
