// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Named look-back window relative to an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeToken {
    Today,
    Week,
    Month,
    Quarter,
    Year,
    All,
}

impl RangeToken {
    /// Lenient parse: anything unrecognized means all time.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "today" => RangeToken::Today,
            "week" => RangeToken::Week,
            "month" => RangeToken::Month,
            "quarter" => RangeToken::Quarter,
            "year" => RangeToken::Year,
            _ => RangeToken::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::Today => "today",
            RangeToken::Week => "week",
            RangeToken::Month => "month",
            RangeToken::Quarter => "quarter",
            RangeToken::Year => "year",
            RangeToken::All => "all",
        }
    }

    pub fn resolve(self, now: NaiveDateTime) -> DateRange {
        let start = match self {
            RangeToken::Today => Some(now.date().and_time(NaiveTime::MIN)),
            RangeToken::Week => now.checked_sub_signed(Duration::days(7)),
            RangeToken::Month => now.checked_sub_months(Months::new(1)),
            RangeToken::Quarter => now.checked_sub_months(Months::new(3)),
            RangeToken::Year => now.checked_sub_months(Months::new(12)),
            RangeToken::All => None,
        };
        DateRange {
            start: start.unwrap_or(NaiveDateTime::MIN),
            end: now,
        }
    }
}

/// Inclusive `[start, end]` instant pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn all_time(now: NaiveDateTime) -> Self {
        RangeToken::All.resolve(now)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// A calendar date is placed at its midnight before comparing.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN))
    }
}

pub fn resolve_range(token: &str, now: NaiveDateTime) -> DateRange {
    RangeToken::parse(token).resolve(now)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 31,
    }
}

/// `(year, month)` of the calendar month preceding the one containing `date`.
pub fn previous_month<D: Datelike>(date: &D) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}
