// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

use crate::commands::load_transactions;
use crate::engine::{Aggregator, Diagnostics};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, agg: &Aggregator, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, agg, sub)?,
        Some(("categories", sub)) => categories(conn, agg, sub)?,
        Some(("month", sub)) => month(conn, agg, sub)?,
        Some(("year", sub)) => year(conn, agg, sub)?,
        _ => {}
    }
    Ok(())
}

fn warn_diagnostics(d: &Diagnostics) {
    if !d.is_clean() {
        eprintln!(
            "warning: {} malformed amount(s) counted as zero, {} transaction(s) of unknown type skipped, {} amount(s) too large to total (run `budgetwise doctor`)",
            d.malformed_amounts, d.unknown_kinds, d.overflowed_amounts
        );
    }
}

fn summary(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<()> {
    let txs = load_transactions(conn, sub)?;
    let s = agg.summarize(&txs);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let mut rows = vec![
        vec!["Total Income".to_string(), fmt_money(&s.total_income, &ccy)],
        vec!["Total Expenses".to_string(), fmt_money(&s.total_expenses, &ccy)],
        vec!["Reserved Savings".to_string(), fmt_money(&s.reserved_savings, &ccy)],
        vec!["Total Balance".to_string(), fmt_money(&s.total_balance, &ccy)],
    ];
    if s.raw_balance != s.total_balance {
        rows.push(vec!["Signed Balance".to_string(), fmt_money(&s.raw_balance, &ccy)]);
    }
    println!(
        "As of {} (matured reserve: {})",
        agg.today(),
        agg.policy().as_str()
    );
    println!("{}", pretty_table(&["Figure", "Amount"], rows));
    warn_diagnostics(&s.diagnostics);
    Ok(())
}

fn categories(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<()> {
    let txs = load_transactions(conn, sub)?;
    let o = agg.overview(&txs);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &o.categories)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = o
        .categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.total, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    warn_diagnostics(&o.summary.diagnostics);
    Ok(())
}

fn month(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<()> {
    let (y, m) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => (agg.today().year(), agg.today().month()),
    };
    let txs = load_transactions(conn, sub)?;
    let p = agg.period_breakdown(&txs, y, m)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = vec![vec![
        format!("{:04}-{:02}", p.year, p.month),
        fmt_money(&p.income, &ccy),
        fmt_money(&p.expenses, &ccy),
        fmt_money(&p.balance, &ccy),
    ]];
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
    );
    warn_diagnostics(&p.diagnostics);
    Ok(())
}

fn year(conn: &Connection, agg: &Aggregator, sub: &clap::ArgMatches) -> Result<()> {
    let y = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| agg.today().year());
    let txs = load_transactions(conn, sub)?;
    let report = agg.yearly_report(&txs, y);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report.months)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = report
        .months
        .iter()
        .map(|p| {
            vec![
                p.month.to_string(),
                fmt_money(&p.income, &ccy),
                fmt_money(&p.expenses, &ccy),
                fmt_money(&p.balance, &ccy),
            ]
        })
        .collect();
    println!("{}", y);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
    );
    warn_diagnostics(&report.diagnostics);
    Ok(())
}
