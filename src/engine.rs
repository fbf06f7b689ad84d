// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income, expense and reserved-savings aggregation.
//!
//! Every figure is derived from a transaction list and an explicit reference
//! date. Nothing here reads the clock or keeps state between calls, so the
//! same inputs always give the same output.
//!
//! Classification of a single transaction:
//!
//! | transaction                             | income | expenses | reserved |
//! |-----------------------------------------|--------|----------|----------|
//! | expense                                 |        | yes      |          |
//! | income, not reserved                    | yes    |          |          |
//! | income, reserved, date > today          |        |          | yes      |
//! | income, reserved, date <= today         | yes    | policy   |          |
//!
//! The last row is governed by [`MaturedReserve`].

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{Transaction, TxKind};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const UNCATEGORIZED: &str = "(uncategorized)";

/// How a reserved income is counted once its date has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturedReserve {
    /// Realized income that is also drawn out of the pot as an expense.
    #[default]
    Outflow,
    /// Realized income only.
    Income,
}

impl MaturedReserve {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaturedReserve::Outflow => "outflow",
            MaturedReserve::Income => "income",
        }
    }
}

impl FromStr for MaturedReserve {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outflow" => Ok(MaturedReserve::Outflow),
            "income" => Ok(MaturedReserve::Income),
            other => Err(EngineError::InvalidPolicy(other.to_string())),
        }
    }
}

/// Data-quality events seen while aggregating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Amounts that were not numeric and were counted as zero.
    pub malformed_amounts: usize,
    /// Transactions whose type was neither income nor expense.
    pub unknown_kinds: usize,
    /// Amounts left out because adding them would overflow a total.
    pub overflowed_amounts: usize,
    pub flagged_ids: Vec<i64>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.malformed_amounts == 0 && self.unknown_kinds == 0 && self.overflowed_amounts == 0
    }

    fn merge(&mut self, other: Diagnostics) {
        self.malformed_amounts += other.malformed_amounts;
        self.unknown_kinds += other.unknown_kinds;
        self.overflowed_amounts += other.overflowed_amounts;
        self.flagged_ids.extend(other.flagged_ids);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub reserved_savings: Decimal,
    /// `raw_balance` clamped at zero for display.
    pub total_balance: Decimal,
    pub raw_balance: Decimal,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub raw_balance: Decimal,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPoint {
    pub month: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// A summary and its category breakdown from a single pass, so each
/// data-quality event is counted and logged once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyReport {
    pub year: i32,
    pub months: Vec<MonthPoint>,
    pub diagnostics: Diagnostics,
}

/// Which buckets a transaction's amount is added to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub income: bool,
    pub expense: bool,
    pub reserved: bool,
}

#[derive(Debug, Default)]
struct Tally {
    income: Decimal,
    expenses: Decimal,
    reserved: Decimal,
    /// Expense totals in first-seen order.
    categories: Vec<CategoryTotal>,
    diagnostics: Diagnostics,
}

impl Tally {
    fn raw_balance(&self) -> Decimal {
        self.income.saturating_sub(self.expenses)
    }

    fn into_overview(self) -> Overview {
        let raw_balance = self.raw_balance();
        let mut categories = self.categories;
        // stable: equal totals keep first-seen order
        categories.sort_by(|a, b| b.total.cmp(&a.total));
        Overview {
            summary: Summary {
                total_income: self.income,
                total_expenses: self.expenses,
                reserved_savings: self.reserved,
                total_balance: raw_balance.max(Decimal::ZERO),
                raw_balance,
                diagnostics: self.diagnostics,
            },
            categories,
        }
    }
}

/// `total + amount` when the bucket counts the amount, `None` on overflow.
fn bump(total: Decimal, counted: bool, amount: Decimal) -> Option<Decimal> {
    if counted {
        total.checked_add(amount)
    } else {
        Some(total)
    }
}

fn category_name(tx: &Transaction) -> &str {
    match tx.category.trim() {
        "" => UNCATEGORIZED,
        c => c,
    }
}

/// Aggregation bound to one reference date and one matured-reserve policy.
///
/// Build one per request and pass it to every consumer so all figures of a
/// single report agree on what "today" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    today: NaiveDate,
    policy: MaturedReserve,
}

impl Aggregator {
    /// Parses `today` as `YYYY-MM-DD`. An unparseable date is an error; there
    /// is no fallback to the system clock.
    pub fn new(today: &str) -> Result<Self, EngineError> {
        let date = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
            .map_err(|_| EngineError::InvalidToday(today.to_string()))?;
        Ok(Self::on(date))
    }

    pub fn on(today: NaiveDate) -> Self {
        Aggregator {
            today,
            policy: MaturedReserve::default(),
        }
    }

    pub fn with_policy(mut self, policy: MaturedReserve) -> Self {
        self.policy = policy;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn policy(&self) -> MaturedReserve {
        self.policy
    }

    pub fn classify(&self, tx: &Transaction) -> Classification {
        match tx.kind {
            TxKind::Expense => Classification {
                expense: true,
                ..Default::default()
            },
            TxKind::Income if !tx.reserved => Classification {
                income: true,
                ..Default::default()
            },
            TxKind::Income if tx.date > self.today => Classification {
                reserved: true,
                ..Default::default()
            },
            TxKind::Income => Classification {
                income: true,
                expense: self.policy == MaturedReserve::Outflow,
                reserved: false,
            },
            TxKind::Unknown => Classification::default(),
        }
    }

    pub fn summarize(&self, txs: &[Transaction]) -> Summary {
        self.overview(txs).summary
    }

    /// Expense totals per category, largest first. Equal totals keep the
    /// order in which their category first appeared.
    pub fn category_breakdown(&self, txs: &[Transaction]) -> Vec<CategoryTotal> {
        self.overview(txs).categories
    }

    /// [`summarize`](Self::summarize) and
    /// [`category_breakdown`](Self::category_breakdown) together.
    pub fn overview(&self, txs: &[Transaction]) -> Overview {
        debug!(
            count = txs.len(),
            today = %self.today,
            policy = self.policy.as_str(),
            "summarizing transactions"
        );
        self.tally(txs.iter()).into_overview()
    }

    pub fn period_breakdown(
        &self,
        txs: &[Transaction],
        year: i32,
        month: u32,
    ) -> Result<PeriodTotals, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(month));
        }
        Ok(self.period(txs, year, month))
    }

    /// Twelve entries, January to December. Balances are clamped at zero.
    pub fn yearly_series(&self, txs: &[Transaction], year: i32) -> Vec<MonthPoint> {
        self.yearly_report(txs, year).months
    }

    /// The yearly series plus the data-quality events of the whole year.
    pub fn yearly_report(&self, txs: &[Transaction], year: i32) -> YearlyReport {
        let mut diagnostics = Diagnostics::default();
        let months = MONTH_LABELS
            .iter()
            .zip(1u32..)
            .map(|(label, month)| {
                let p = self.period(txs, year, month);
                diagnostics.merge(p.diagnostics);
                MonthPoint {
                    month: *label,
                    income: p.income,
                    expenses: p.expenses,
                    balance: p.balance,
                }
            })
            .collect();
        YearlyReport {
            year,
            months,
            diagnostics,
        }
    }

    fn period(&self, txs: &[Transaction], year: i32, month: u32) -> PeriodTotals {
        let s = self
            .tally(
                txs.iter()
                    .filter(|t| t.date.year() == year && t.date.month() == month),
            )
            .into_overview()
            .summary;
        PeriodTotals {
            year,
            month,
            income: s.total_income,
            expenses: s.total_expenses,
            balance: s.total_balance,
            raw_balance: s.raw_balance,
            diagnostics: s.diagnostics,
        }
    }

    /// One pass over `txs`. A transaction whose amount would overflow any
    /// total it counts towards is left out of all of them.
    fn tally<'a>(&self, txs: impl Iterator<Item = &'a Transaction>) -> Tally {
        let mut tally = Tally::default();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        for tx in txs {
            if tx.kind == TxKind::Unknown {
                warn!(id = tx.id, "transaction has an unknown type, skipping");
                tally.diagnostics.unknown_kinds += 1;
                tally.diagnostics.flagged_ids.push(tx.id);
                continue;
            }
            let class = self.classify(tx);
            let amount = coerce_amount(tx, &mut tally.diagnostics);
            let slot = class.expense.then(|| category_name(tx));
            let current = slot
                .and_then(|name| index.get(name))
                .map_or(Decimal::ZERO, |&i| tally.categories[i].total);

            let sums = (
                bump(tally.income, class.income, amount),
                bump(tally.expenses, class.expense, amount),
                bump(tally.reserved, class.reserved, amount),
                bump(current, class.expense, amount),
            );
            let (Some(income), Some(expenses), Some(reserved), Some(category_total)) = sums else {
                warn!(id = tx.id, amount = %amount, "amount overflows a running total, skipping");
                tally.diagnostics.overflowed_amounts += 1;
                tally.diagnostics.flagged_ids.push(tx.id);
                continue;
            };
            tally.income = income;
            tally.expenses = expenses;
            tally.reserved = reserved;
            if let Some(name) = slot {
                match index.get(name) {
                    Some(&i) => tally.categories[i].total = category_total,
                    None => {
                        index.insert(name, tally.categories.len());
                        tally.categories.push(CategoryTotal {
                            category: name.to_string(),
                            total: category_total,
                        });
                    }
                }
            }
        }
        tally
    }
}

fn coerce_amount(tx: &Transaction, diagnostics: &mut Diagnostics) -> Decimal {
    match tx.amount.value() {
        Some(d) => d,
        None => {
            warn!(
                id = tx.id,
                raw = %tx.amount.to_text(),
                "non-numeric amount counted as zero"
            );
            diagnostics.malformed_amounts += 1;
            diagnostics.flagged_ids.push(tx.id);
            Decimal::ZERO
        }
    }
}

pub fn summarize(txs: &[Transaction], today: &str) -> Result<Summary, EngineError> {
    Ok(Aggregator::new(today)?.summarize(txs))
}

pub fn category_breakdown(
    txs: &[Transaction],
    today: &str,
) -> Result<Vec<CategoryTotal>, EngineError> {
    Ok(Aggregator::new(today)?.category_breakdown(txs))
}

pub fn period_breakdown(
    txs: &[Transaction],
    today: &str,
    year: i32,
    month: u32,
) -> Result<PeriodTotals, EngineError> {
    Aggregator::new(today)?.period_breakdown(txs, year, month)
}

pub fn yearly_series(
    txs: &[Transaction],
    today: &str,
    year: i32,
) -> Result<Vec<MonthPoint>, EngineError> {
    Ok(Aggregator::new(today)?.yearly_series(txs, year))
}
