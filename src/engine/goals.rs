// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goal progress. `current_amount` only moves through [`apply_delta`],
//! which keeps it inside `[0, target_amount]`.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::SavingsGoal;

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn clamp_amount(value: Decimal, target: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(target.max(Decimal::ZERO))
}

pub fn progress_percent(goal: &SavingsGoal) -> Decimal {
    if goal.target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    goal.current_amount
        .checked_div(goal.target_amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// New current amount after a contribution (positive) or withdrawal
/// (negative), clamped into the goal's bounds.
pub fn apply_delta(goal: &SavingsGoal, amount: Decimal) -> Decimal {
    let next = goal
        .current_amount
        .checked_add(amount)
        .unwrap_or(if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
    clamp_amount(next, goal.target_amount)
}

/// Copy of `goal` with [`apply_delta`] applied.
pub fn with_delta(goal: &SavingsGoal, amount: Decimal) -> SavingsGoal {
    SavingsGoal {
        current_amount: apply_delta(goal, amount),
        ..goal.clone()
    }
}

/// Whole days until the deadline's midnight, rounded up. Negative when overdue.
pub fn days_remaining(goal: &SavingsGoal, now: NaiveDateTime) -> i64 {
    let millis = (goal.deadline.and_time(NaiveTime::MIN) - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

pub fn is_complete(goal: &SavingsGoal) -> bool {
    goal.current_amount >= goal.target_amount
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub percent: Decimal,
    pub days_remaining: i64,
    pub complete: bool,
}

pub fn goal_progress(goal: &SavingsGoal, now: NaiveDateTime) -> GoalProgress {
    GoalProgress {
        id: goal.id.clone(),
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        percent: progress_percent(goal),
        days_remaining: days_remaining(goal, now),
        complete: is_complete(goal),
    }
}
