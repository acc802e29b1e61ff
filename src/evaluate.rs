//! Match evaluator: decides whether a rule fires on a given date.
//!
//! Evaluation is pure; "today" is always passed in by the caller, so
//! the same document and date always produce the same match set.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::document::{Document, Entry};
use crate::epoch::{epoch_days, epoch_months, epoch_weeks, Unit};
use crate::tag::RecurrenceRule;

/// True iff `rule` fires on `today`.
pub fn matches(rule: &RecurrenceRule, today: NaiveDate) -> bool {
    match rule {
        RecurrenceRule::Weekday {
            day,
            period,
            offset,
        } => today.weekday() == *day && epoch_weeks(today).rem_euclid(*period) == *offset,
        RecurrenceRule::DayOfMonth(day) => today.day() == *day,
        RecurrenceRule::FixedDate { month, day, year } => {
            today.month() == *month
                && today.day() == *day
                && year.map_or(true, |y| today.year() == y)
        }
        RecurrenceRule::Every {
            unit: Unit::Day,
            period,
            offset,
        } => epoch_days(today).rem_euclid(*period) == *offset,
        RecurrenceRule::Every {
            unit: Unit::Week,
            period,
            offset,
        } => {
            today.weekday() == Weekday::Sun
                && epoch_weeks(today).rem_euclid(*period) == *offset
        }
        RecurrenceRule::Every {
            unit: Unit::Month,
            period,
            offset,
        } => today.day() == 1 && epoch_months(today).rem_euclid(*period) == *offset,
        RecurrenceRule::Any => false,
    }
}

/// Block indices of the entries that fire on `today`, in document order.
pub fn evaluate(doc: &Document, today: NaiveDate) -> Vec<usize> {
    doc.entries()
        .filter(|(_, entry)| matches(&entry.rule, today))
        .map(|(index, _)| index)
        .collect()
}

/// The `[any]` bucket: unscheduled entries, never returned by
/// [`evaluate`].
pub fn later_entries(doc: &Document) -> Vec<&Entry> {
    doc.entries()
        .filter(|(_, entry)| entry.rule == RecurrenceRule::Any)
        .map(|(_, entry)| entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::epoch;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2021-04-25: a Sunday with epoch_days 18742, epoch_weeks 2677.
    const SUNDAY: (i32, u32, u32) = (2021, 4, 25);

    fn sunday() -> NaiveDate {
        date(SUNDAY.0, SUNDAY.1, SUNDAY.2)
    }

    fn rule(tag: &str) -> RecurrenceRule {
        crate::tag::parse_tag_line(&format!("{} x", tag)).unwrap().rule
    }

    #[test]
    fn test_weekday_match() {
        assert!(matches(&rule("[sun]"), sunday()));
        assert!(!matches(&rule("[mon]"), sunday()));
        assert!(matches(&rule("[mon]"), date(2021, 4, 26)));
    }

    #[test]
    fn test_weekday_scoped_modulo_partitions() {
        // epoch_weeks(2021-04-25) == 2677, 2677 % 2 == 1
        assert!(matches(&rule("[sun%2+1]"), sunday()));
        assert!(!matches(&rule("[sun%2]"), sunday()));
        // the following Sunday lands in the other class
        let next = date(2021, 5, 2);
        assert!(matches(&rule("[sun%2]"), next));
        assert!(!matches(&rule("[sun%2+1]"), next));
    }

    #[test]
    fn test_day_of_month() {
        assert!(matches(&rule("[D25]"), sunday()));
        assert!(!matches(&rule("[D01]"), sunday()));
    }

    #[test]
    fn test_fixed_dates() {
        assert!(matches(&rule("[4/25]"), sunday()));
        assert!(matches(&rule("[04-25]"), sunday()));
        assert!(matches(&rule("[2021-04-25]"), sunday()));
        assert!(!matches(&rule("[2020-04-25]"), sunday()));
        assert!(!matches(&rule("[4/24]"), sunday()));
    }

    #[test]
    fn test_epoch_week_scenario() {
        // epoch_weeks == 2677 and 2677 % 3 == 1
        assert!(matches(&rule("[W%3+1]"), sunday()));
        assert!(!matches(&rule("[W%3]"), sunday()));
        assert!(!matches(&rule("[W%3+2]"), sunday()));
        // same residue on a non-Sunday does not fire
        let monday = date(2021, 4, 26);
        assert!(!matches(&rule("[W%3+1]"), monday));
    }

    #[test]
    fn test_epoch_day() {
        let today = sunday(); // epoch_days 18742, 18742 % 5 == 2
        assert!(matches(&rule("[D%5+2]"), today));
        assert!(!matches(&rule("[D%5]"), today));
        assert!(matches(&rule("[D]"), today));
    }

    #[test]
    fn test_epoch_month_requires_first_of_month() {
        // 2021-05-01: epoch_months == 616, 616 % 4 == 0
        let first = date(2021, 5, 1);
        assert_eq!(epoch::epoch_months(first), 616);
        assert!(matches(&rule("[M%4]"), first));
        assert!(!matches(&rule("[M%4+1]"), first));
        // not the 1st
        assert!(!matches(&rule("[M%4]"), date(2021, 5, 2)));
    }

    #[test]
    fn test_any_never_matches() {
        assert!(!matches(&RecurrenceRule::Any, sunday()));
    }

    #[test]
    fn test_partition_law_over_sundays() {
        // every Sunday belongs to exactly one offset class of [W%3+o]
        let rules = [rule("[W%3]"), rule("[W%3+1]"), rule("[W%3+2]")];
        let mut day = date(2021, 1, 3); // a Sunday
        for _ in 0..20 {
            let hits = rules.iter().filter(|r| matches(r, day)).count();
            assert_eq!(hits, 1, "exactly one class covers {}", day);
            day = day + chrono::Duration::days(7);
        }
    }

    #[test]
    fn test_evaluate_and_idempotence() {
        let text = "[sun] Weekly review\n[mon] Standup\n[D25] Pay rent\n[any] Someday\n";
        let doc = Document::parse(text);
        let matched = evaluate(&doc, sunday());
        // sun and D25 both fire on 2021-04-25
        assert_eq!(matched.len(), 2);
        // same inputs, same match set
        assert_eq!(matched, evaluate(&doc, sunday()));
    }

    #[test]
    fn test_later_entries() {
        let text = "[sun] Weekly review\n[any] Someday\n[any] Also someday\n";
        let doc = Document::parse(text);
        let later = later_entries(&doc);
        assert_eq!(later.len(), 2);
        assert_eq!(later[0].title, "Someday");
    }
}
