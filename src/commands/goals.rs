// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::goals::{self, progress, GoalPatch, GoalStore, SqliteGoalStore};
use crate::models::Goal;
use crate::utils::{fmt_money, get_currency, get_setting, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteGoalStore::new(conn);
    let user = get_setting(conn, "user")?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let g = goals::add_goal(
                &store,
                &user,
                sub.get_one::<String>("title").unwrap(),
                sub.get_one::<String>("description")
                    .map(String::as_str)
                    .unwrap_or(""),
                *sub.get_one::<u32>("days").unwrap(),
                parse_decimal(sub.get_one::<String>("target").unwrap())?,
            )?;
            println!("Added goal {} '{}'", g.id, g.title);
        }
        Some(("list", sub)) => list(conn, &store, &user, sub)?,
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let patch = GoalPatch {
                title: sub.get_one::<String>("title").cloned(),
                description: sub.get_one::<String>("description").cloned(),
                days: sub.get_one::<u32>("days").copied(),
                target_amount: sub
                    .get_one::<String>("target")
                    .map(|s| parse_decimal(s))
                    .transpose()?,
            };
            let g = goals::edit_goal(&store, &user, id, patch)?;
            println!("Updated goal {} '{}'", g.id, g.title);
        }
        Some(("save", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let g = goals::set_saved(&store, &user, id, amount)?;
            let p = progress(&g);
            println!("Goal {} is {:.0}% funded", g.id, p.percent);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            goals::remove_goal(&store, &user, id)?;
            println!("Removed goal {}", id);
        }
        Some(("clear", _)) => {
            store.clear(&user)?;
            println!("Cleared goals for '{}'", user);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    #[serde(flatten)]
    pub goal: Goal,
    #[serde(flatten)]
    pub progress: goals::GoalProgress,
}

pub fn goal_rows(store: &dyn GoalStore, user: &str) -> Result<Vec<GoalRow>> {
    let rows = store
        .load(user)
        .with_context(|| format!("Load goals for '{}'", user))?
        .into_iter()
        .map(|g| GoalRow {
            progress: progress(&g),
            goal: g,
        })
        .collect();
    Ok(rows)
}

fn list(
    conn: &Connection,
    store: &dyn GoalStore,
    user: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = goal_rows(store, user)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.goal.id.to_string(),
                r.goal.title.clone(),
                format!(
                    "{} / {}",
                    fmt_money(&r.goal.saved_amount, &ccy),
                    fmt_money(&r.goal.target_amount, &ccy)
                ),
                format!("{:.0}%", r.progress.percent),
                r.goal.days.to_string(),
                if r.progress.completed {
                    "done".to_string()
                } else {
                    format!("{}/day", fmt_money(&r.progress.per_day, &ccy))
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Goal", "Saved", "Progress", "Days", "Pace"], rows)
    );
    Ok(())
}
