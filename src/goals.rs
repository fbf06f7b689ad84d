// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals, kept per user in a key-value store.

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::GoalError;
use crate::models::Goal;

pub trait GoalStore {
    fn load(&self, user: &str) -> Result<Vec<Goal>, GoalError>;
    fn save(&self, user: &str, goals: &[Goal]) -> Result<(), GoalError>;
    fn clear(&self, user: &str) -> Result<(), GoalError>;
}

pub fn storage_key(user: &str) -> String {
    format!("budgetwise_goals_{}", user)
}

/// Stores each user's goals as one JSON document in the `kv` table.
pub struct SqliteGoalStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteGoalStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteGoalStore { conn }
    }
}

impl GoalStore for SqliteGoalStore<'_> {
    fn load(&self, user: &str) -> Result<Vec<Goal>, GoalError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![storage_key(user)],
                |r| r.get(0),
            )
            .optional()?;
        match raw {
            Some(s) => Ok(serde_json::from_str(&s)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, user: &str, goals: &[Goal]) -> Result<(), GoalError> {
        let doc = serde_json::to_string(goals)?;
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![storage_key(user), doc],
        )?;
        debug!(user, count = goals.len(), "saved goals");
        Ok(())
    }

    fn clear(&self, user: &str) -> Result<(), GoalError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![storage_key(user)])?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// 0-100.
    pub percent: Decimal,
    pub remaining: Decimal,
    /// Whole currency units per day needed to finish on time.
    pub per_day: Decimal,
    pub completed: bool,
}

pub fn progress(goal: &Goal) -> GoalProgress {
    let hundred = Decimal::ONE_HUNDRED;
    let saved = goal.saved_amount;
    let percent = if goal.target_amount > Decimal::ZERO {
        // overflow means saved dwarfs the target
        saved
            .checked_div(goal.target_amount)
            .and_then(|r| r.checked_mul(hundred))
            .map_or(
                if saved > Decimal::ZERO { hundred } else { Decimal::ZERO },
                |p| p.min(hundred),
            )
    } else {
        Decimal::ZERO
    };
    let remaining = goal
        .target_amount
        .saturating_sub(saved)
        .max(Decimal::ZERO);
    let per_day = if goal.days > 0 {
        (remaining / Decimal::from(goal.days)).ceil()
    } else {
        Decimal::ZERO
    };
    GoalProgress {
        percent,
        remaining,
        per_day,
        completed: percent == hundred,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub days: Option<u32>,
    pub target_amount: Option<Decimal>,
}

pub fn add_goal(
    store: &dyn GoalStore,
    user: &str,
    title: &str,
    description: &str,
    days: u32,
    target_amount: Decimal,
) -> Result<Goal, GoalError> {
    if target_amount <= Decimal::ZERO {
        return Err(GoalError::InvalidTarget);
    }
    let mut goals = store.load(user)?;
    let id = goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
    let goal = Goal {
        id,
        title: title.to_string(),
        description: description.to_string(),
        days,
        target_amount,
        saved_amount: Decimal::ZERO,
    };
    goals.push(goal.clone());
    store.save(user, &goals)?;
    Ok(goal)
}

pub fn edit_goal(
    store: &dyn GoalStore,
    user: &str,
    id: i64,
    patch: GoalPatch,
) -> Result<Goal, GoalError> {
    if matches!(patch.target_amount, Some(t) if t <= Decimal::ZERO) {
        return Err(GoalError::InvalidTarget);
    }
    update(store, user, id, |g| {
        if let Some(t) = patch.title {
            g.title = t;
        }
        if let Some(d) = patch.description {
            g.description = d;
        }
        if let Some(d) = patch.days {
            g.days = d;
        }
        if let Some(t) = patch.target_amount {
            g.target_amount = t;
            g.saved_amount = g.saved_amount.min(t);
        }
    })
}

/// Records how much has been put aside, clamped to 0..=target.
pub fn set_saved(
    store: &dyn GoalStore,
    user: &str,
    id: i64,
    saved: Decimal,
) -> Result<Goal, GoalError> {
    update(store, user, id, |g| {
        g.saved_amount = saved.max(Decimal::ZERO).min(g.target_amount);
    })
}

pub fn remove_goal(store: &dyn GoalStore, user: &str, id: i64) -> Result<(), GoalError> {
    let mut goals = store.load(user)?;
    let before = goals.len();
    goals.retain(|g| g.id != id);
    if goals.len() == before {
        return Err(GoalError::NotFound(id));
    }
    store.save(user, &goals)
}

fn update(
    store: &dyn GoalStore,
    user: &str,
    id: i64,
    f: impl FnOnce(&mut Goal),
) -> Result<Goal, GoalError> {
    let mut goals = store.load(user)?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or(GoalError::NotFound(id))?;
    f(goal);
    let updated = goal.clone();
    store.save(user, &goals)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal, saved: Decimal, days: u32) -> Goal {
        Goal {
            id: 1,
            title: "Laptop".into(),
            description: String::new(),
            days,
            target_amount: target,
            saved_amount: saved,
        }
    }

    #[test]
    fn progress_midway() {
        let p = progress(&goal(dec!(1000), dec!(250), 30));
        assert_eq!(p.percent, dec!(25));
        assert_eq!(p.remaining, dec!(750));
        assert_eq!(p.per_day, dec!(25));
        assert!(!p.completed);
    }

    #[test]
    fn per_day_rounds_up() {
        let p = progress(&goal(dec!(100), dec!(0), 3));
        assert_eq!(p.per_day, dec!(34));
    }

    #[test]
    fn overshoot_is_capped_and_complete() {
        let p = progress(&goal(dec!(100), dec!(150), 10));
        assert_eq!(p.percent, dec!(100));
        assert_eq!(p.remaining, dec!(0));
        assert_eq!(p.per_day, dec!(0));
        assert!(p.completed);
    }

    #[test]
    fn tiny_target_with_large_saving_is_complete() {
        let p = progress(&goal(dec!(0.0000000000000000000000000001), dec!(1000), 30));
        assert_eq!(p.percent, dec!(100));
        assert_eq!(p.remaining, dec!(0));
        assert!(p.completed);
    }

    #[test]
    fn zero_days_needs_nothing_per_day() {
        let p = progress(&goal(dec!(100), dec!(10), 0));
        assert_eq!(p.per_day, dec!(0));
    }

    #[test]
    fn key_is_scoped_by_user() {
        assert_eq!(storage_key("42"), "budgetwise_goals_42");
    }
}
