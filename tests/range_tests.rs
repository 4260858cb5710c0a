// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use spendwise::engine::range::{RangeToken, days_in_month, previous_month, resolve_range};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn week_starts_seven_days_back_at_same_time() {
    let now = at(2025, 1, 25, 14);
    let range = resolve_range("week", now);
    assert_eq!(range.start, at(2025, 1, 18, 14));
    assert_eq!(range.end, now);

    // Midnight of the 18th falls before the start instant.
    assert!(!range.contains_date(day(2025, 1, 18)));
    assert!(range.contains_date(day(2025, 1, 19)));
    assert!(range.contains_date(day(2025, 1, 25)));
    assert!(!range.contains_date(day(2025, 1, 26)));
}

#[test]
fn today_starts_at_midnight() {
    let now = at(2025, 3, 15, 9);
    let range = RangeToken::Today.resolve(now);
    assert_eq!(range.start, at(2025, 3, 15, 0));
    assert!(range.contains_date(day(2025, 3, 15)));
    assert!(!range.contains_date(day(2025, 3, 14)));
}

#[test]
fn month_quarter_year_step_back_calendar_months() {
    let now = at(2024, 5, 10, 8);
    assert_eq!(resolve_range("month", now).start, at(2024, 4, 10, 8));
    assert_eq!(resolve_range("quarter", now).start, at(2024, 2, 10, 8));
    assert_eq!(resolve_range("year", now).start, at(2023, 5, 10, 8));
}

#[test]
fn month_back_from_month_end_clamps() {
    let now = at(2024, 3, 31, 10);
    assert_eq!(resolve_range("month", now).start, at(2024, 2, 29, 10));
}

#[test]
fn all_and_unknown_tokens_cover_everything() {
    let now = at(2025, 1, 25, 12);
    let all = resolve_range("all", now);
    assert_eq!(all.start, NaiveDateTime::MIN);
    assert_eq!(resolve_range("fortnight", now), all);
    assert_eq!(RangeToken::parse("  WEEK "), RangeToken::Week);
    assert!(all.contains_date(day(1970, 1, 1)));
}

#[test]
fn month_helpers() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert_eq!(days_in_month(2024, 12), 31);
    assert_eq!(previous_month(&day(2024, 1, 10)), (2023, 12));
    assert_eq!(previous_month(&day(2024, 7, 1)), (2024, 6));
}
