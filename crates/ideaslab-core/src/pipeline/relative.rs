use std::fmt;

use chrono::{DateTime, Utc};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Coarse age of a timestamp, as shown on idea cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    Today,
    Yesterday,
    Days(i64),
    Weeks(i64),
    Months(i64),
}

impl fmt::Display for RelativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeDate::Today => f.write_str("today"),
            RelativeDate::Yesterday => f.write_str("yesterday"),
            RelativeDate::Days(n) => write!(f, "{n} days ago"),
            RelativeDate::Weeks(n) => write!(f, "{n} weeks ago"),
            RelativeDate::Months(n) => write!(f, "{n} months ago"),
        }
    }
}

/// Whole elapsed 24h periods between `then` and `now`; never calendar days.
pub fn elapsed_days(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - then).num_milliseconds();
    if ms <= 0 { 0 } else { ms / MS_PER_DAY }
}

pub fn relative_date(then: DateTime<Utc>, now: DateTime<Utc>) -> RelativeDate {
    match elapsed_days(then, now) {
        0 => RelativeDate::Today,
        1 => RelativeDate::Yesterday,
        days @ 2..=6 => RelativeDate::Days(days),
        days @ 7..=29 => RelativeDate::Weeks(days / 7),
        days => RelativeDate::Months(days / 30),
    }
}
