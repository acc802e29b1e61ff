//! Epoch calendar: pure conversions from a calendar date to day, week
//! and month counts since the Unix epoch, plus the offset solver.
//!
//! Dates are naive UTC calendar dates; there is no leap-second handling.
//! Month counts are taken from calendar boundaries, not derived from day
//! counts, since months have irregular length.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// The unit of an epoch-based recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Week,
    Month,
}

impl Unit {
    /// The single-letter selector used inside a tag, e.g. `[W%3+1]`.
    pub fn selector(self) -> char {
        match self {
            Unit::Day => 'D',
            Unit::Week => 'W',
            Unit::Month => 'M',
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Day => write!(f, "day"),
            Unit::Week => write!(f, "week"),
            Unit::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(Unit::Day),
            "week" | "w" => Ok(Unit::Week),
            "month" | "m" => Ok(Unit::Month),
            other => Err(format!("'{}' must be 'day', 'week', or 'month'", other)),
        }
    }
}

fn epoch_start() -> NaiveDate {
    // 1970-01-01 is always a valid date
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Whole days since 1970-01-01.
pub fn epoch_days(date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch_start()).num_days()
}

/// Whole weeks since the epoch: `floor(epoch_days / 7)`.
pub fn epoch_weeks(date: NaiveDate) -> i64 {
    epoch_days(date).div_euclid(7)
}

/// Month boundaries since the epoch: `(year - 1970) * 12 + (month - 1)`.
pub fn epoch_months(date: NaiveDate) -> i64 {
    (i64::from(date.year()) - 1970) * 12 + i64::from(date.month0())
}

/// The epoch count for `date` in the given unit.
pub fn epoch_units(unit: Unit, date: NaiveDate) -> i64 {
    match unit {
        Unit::Day => epoch_days(date),
        Unit::Week => epoch_weeks(date),
        Unit::Month => epoch_months(date),
    }
}

/// Inverse of the evaluator's modulo test: the offset that makes
/// `[<unit>%<period>+<offset>]` fire on `anchor`.
///
/// `period` must be at least 1. The raw residue is returned even when
/// the unit's structural precondition (Sunday for weeks, day 1 for
/// months) does not hold on `anchor`, so the result is still usable
/// for planning.
pub fn solve_offset(unit: Unit, anchor: NaiveDate, period: i64) -> i64 {
    epoch_units(unit, anchor).rem_euclid(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_days_at_epoch() {
        assert_eq!(epoch_days(date(1970, 1, 1)), 0);
        assert_eq!(epoch_days(date(1970, 1, 2)), 1);
    }

    #[test]
    fn test_epoch_days_matches_unix_seconds() {
        // 2021-04-25 is epoch second 1619394350 mid-day;
        // floor(1619394350 / 86400) == 18742
        assert_eq!(epoch_days(date(2021, 4, 25)), 18742);
    }

    #[test]
    fn test_epoch_weeks_scenario() {
        // floor(18742 / 7) == 2677
        assert_eq!(epoch_weeks(date(2021, 4, 25)), 2677);
    }

    #[test]
    fn test_epoch_months_is_calendar_based() {
        assert_eq!(epoch_months(date(1970, 1, 31)), 0);
        assert_eq!(epoch_months(date(1970, 2, 1)), 1);
        assert_eq!(epoch_months(date(2021, 4, 25)), (2021 - 1970) * 12 + 3);
    }

    #[test]
    fn test_solve_offset_residue() {
        let anchor = date(2021, 4, 25);
        assert_eq!(solve_offset(Unit::Week, anchor, 3), 2677 % 3);
        assert_eq!(solve_offset(Unit::Day, anchor, 5), 18742 % 5);
        assert_eq!(solve_offset(Unit::Day, anchor, 1), 0);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("day".parse::<Unit>().unwrap(), Unit::Day);
        assert_eq!("WEEK".parse::<Unit>().unwrap(), Unit::Week);
        assert_eq!("m".parse::<Unit>().unwrap(), Unit::Month);
        assert!("year".parse::<Unit>().is_err());
    }
}
