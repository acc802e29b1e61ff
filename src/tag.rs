//! Tag parser: turns one raw bracket expression into a structured
//! recurrence rule plus post-fire modifier.
//!
//! Grammar (case-insensitive): `[<selector>(%<period>)?(+<offset>)?]<modifier>? <title> [# comment]`
//!
//! Selectors:
//! - weekday codes `sun`..`sat`
//! - `D<two-digit day>` for a day of the month, e.g. `D07`
//! - `D`, `W`, `M` for epoch-unit recurrence, e.g. `W%3+1`
//! - date tokens `MM-DD`, `M/D`, or `YYYY-MM-DD`
//! - `any` for the unscheduled "for later" bucket
//!
//! The modifier is the run of characters immediately after `]` with no
//! intervening whitespace: `d` (delete after firing), a counter like
//! `3` (decrement after firing, delete at 1), and/or `c` (execute the
//! title as a shell command instead of delivering it).

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::epoch::Unit;
use crate::error::TagError;

/// One parsed recurrence selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    /// A weekday, optionally restricted to every Nth week,
    /// e.g. `[thu]` or `[thu%2+1]`.
    Weekday {
        day: Weekday,
        period: i64,
        offset: i64,
    },
    /// A fixed day of the month, e.g. `[D15]`.
    DayOfMonth(u32),
    /// A fixed date; annual when the year is absent.
    FixedDate {
        month: u32,
        day: u32,
        year: Option<i32>,
    },
    /// Every Nth epoch day/week/month, e.g. `[W%3+1]`.
    Every { unit: Unit, period: i64, offset: i64 },
    /// Unscheduled; never auto-matches.
    Any,
}

/// What happens to an entry after it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Recurs indefinitely.
    Recurring,
    /// Fire once, then remove the entry.
    DeleteOnce,
    /// Fire, then decrement; behaves as `DeleteOnce` at 1.
    Counter(u32),
}

/// The full modifier: deletion/decrement behavior plus whether the
/// title is executed as a command rather than delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    pub run_as_command: bool,
    pub disposition: Disposition,
}

impl Modifier {
    pub const NONE: Modifier = Modifier {
        run_as_command: false,
        disposition: Disposition::Recurring,
    };

    /// The textual token as it appears after the closing bracket.
    pub fn token(&self) -> String {
        let mut out = String::new();
        if self.run_as_command {
            out.push('c');
        }
        match self.disposition {
            Disposition::Recurring => {}
            Disposition::DeleteOnce => out.push('d'),
            Disposition::Counter(n) => out.push_str(&n.to_string()),
        }
        out
    }
}

/// Result of parsing one tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub rule: RecurrenceRule,
    pub modifier: Modifier,
    pub title: String,
}

static FULL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("static regex"));
static MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})$").expect("static regex"));
static SLASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})$").expect("static regex"));
static DAY_OF_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^d(\d+)$").expect("static regex"));

/// Parse one line that begins with `[` into rule, modifier and title.
///
/// The title has its trailing `#`-prefixed comment stripped; note lines
/// are not handled here (see the document model).
pub fn parse_tag_line(line: &str) -> Result<ParsedTag, TagError> {
    if !line.starts_with('[') {
        return Err(TagError::Malformed(
            "tag must start at the first column with '['".to_string(),
        ));
    }
    let close = line
        .find(']')
        .ok_or_else(|| TagError::Malformed("unterminated bracket".to_string()))?;

    let inner = &line[1..close];
    if inner.trim().is_empty() {
        return Err(TagError::Malformed("empty tag".to_string()));
    }
    let rule = parse_selector(inner)?;

    let rest = &line[close + 1..];
    let token_end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    let modifier = parse_modifier(&rest[..token_end])?;
    let title = strip_title_comment(rest[token_end..].trim()).to_string();

    Ok(ParsedTag {
        rule,
        modifier,
        title,
    })
}

/// Parse the selector between the brackets.
fn parse_selector(inner: &str) -> Result<RecurrenceRule, TagError> {
    let lowered = inner.trim().to_ascii_lowercase();

    let (head, offset) = match lowered.split_once('+') {
        Some((head, raw)) => (head, Some(parse_count(raw, "offset")?)),
        None => (lowered.as_str(), None),
    };
    let (selector, period) = match head.split_once('%') {
        Some((selector, raw)) => {
            let period = parse_count(raw, "period")?;
            if period < 1 {
                return Err(TagError::Malformed(
                    "period must be at least 1".to_string(),
                ));
            }
            (selector, Some(period))
        }
        None => (head, None),
    };

    if let Some(day) = weekday_code(selector) {
        let (period, offset) = periodic(period, offset)?;
        return Ok(RecurrenceRule::Weekday {
            day,
            period,
            offset,
        });
    }

    match selector {
        "d" | "w" | "m" => {
            let unit = match selector {
                "d" => Unit::Day,
                "w" => Unit::Week,
                _ => Unit::Month,
            };
            let (period, offset) = periodic(period, offset)?;
            Ok(RecurrenceRule::Every {
                unit,
                period,
                offset,
            })
        }
        "y" => Err(TagError::Malformed(
            "year-based periods are not supported".to_string(),
        )),
        "any" => {
            reject_periodic("'any'", period, offset)?;
            Ok(RecurrenceRule::Any)
        }
        _ => parse_fixed_selector(selector, period, offset),
    }
}

/// Day-of-month and date-token selectors; neither takes `%` or `+`.
fn parse_fixed_selector(
    selector: &str,
    period: Option<i64>,
    offset: Option<i64>,
) -> Result<RecurrenceRule, TagError> {
    if let Some(caps) = DAY_OF_MONTH_RE.captures(selector) {
        reject_periodic("day-of-month", period, offset)?;
        let digits = &caps[1];
        if digits.len() != 2 {
            return Err(TagError::Malformed(
                "day of month must be two digits, e.g. [D07]".to_string(),
            ));
        }
        let day: u32 = digits
            .parse()
            .map_err(|_| TagError::Malformed("day of month is not a number".to_string()))?;
        if day > 31 {
            return Err(TagError::Malformed(
                "no month has more than 31 days".to_string(),
            ));
        }
        if day == 0 {
            return Err(TagError::Malformed(
                "day of month must be at least 1".to_string(),
            ));
        }
        return Ok(RecurrenceRule::DayOfMonth(day));
    }

    let (month, day, year) = if let Some(caps) = FULL_DATE_RE.captures(selector) {
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| TagError::Malformed("invalid year".to_string()))?;
        (parse_u32(&caps[2]), parse_u32(&caps[3]), Some(year))
    } else if let Some(caps) = MONTH_DAY_RE.captures(selector) {
        (parse_u32(&caps[1]), parse_u32(&caps[2]), None)
    } else if let Some(caps) = SLASH_DATE_RE.captures(selector) {
        (parse_u32(&caps[1]), parse_u32(&caps[2]), None)
    } else {
        return Err(TagError::Malformed(format!(
            "unsupported selector '{}'",
            selector
        )));
    };

    reject_periodic("a date", period, offset)?;
    if !(1..=12).contains(&month) {
        return Err(TagError::Malformed(format!("invalid month {}", month)));
    }
    if !(1..=31).contains(&day) {
        return Err(TagError::Malformed(format!("invalid day {}", day)));
    }
    Ok(RecurrenceRule::FixedDate { month, day, year })
}

/// Parse the modifier token directly after the closing bracket.
fn parse_modifier(token: &str) -> Result<Modifier, TagError> {
    let mut run_as_command = false;
    let mut disposition: Option<Disposition> = None;

    let mut i = 0;
    while i < token.len() {
        let c = token[i..].chars().next().unwrap_or_default();
        match c {
            'c' | 'C' if !run_as_command => {
                run_as_command = true;
                i += 1;
            }
            'd' | 'D' if disposition.is_none() => {
                disposition = Some(Disposition::DeleteOnce);
                i += 1;
            }
            '0'..='9' if disposition.is_none() => {
                let end = token[i..]
                    .find(|ch: char| !ch.is_ascii_digit())
                    .map_or(token.len(), |e| i + e);
                let n: u32 = token[i..end]
                    .parse()
                    .map_err(|_| TagError::Malformed("counter is too large".to_string()))?;
                if n == 0 {
                    return Err(TagError::Malformed(
                        "counter must be at least 1".to_string(),
                    ));
                }
                disposition = Some(Disposition::Counter(n));
                i = end;
            }
            _ => {
                return Err(TagError::Malformed(format!(
                    "unknown modifier '{}'",
                    token
                )));
            }
        }
    }

    Ok(Modifier {
        run_as_command,
        disposition: disposition.unwrap_or(Disposition::Recurring),
    })
}

/// Resolve defaults and validate `offset < period`.
fn periodic(period: Option<i64>, offset: Option<i64>) -> Result<(i64, i64), TagError> {
    let period = period.unwrap_or(1);
    let offset = offset.unwrap_or(0);
    if offset >= period {
        return Err(TagError::InvalidOffset { offset, period });
    }
    Ok((period, offset))
}

fn reject_periodic(
    what: &str,
    period: Option<i64>,
    offset: Option<i64>,
) -> Result<(), TagError> {
    if period.is_some() || offset.is_some() {
        return Err(TagError::Malformed(format!(
            "{} takes no period or offset",
            what
        )));
    }
    Ok(())
}

fn parse_count(raw: &str, what: &str) -> Result<i64, TagError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TagError::Malformed(format!("{} must be a number", what)));
    }
    raw.parse()
        .map_err(|_| TagError::Malformed(format!("{} is too large", what)))
}

fn parse_u32(raw: &str) -> u32 {
    raw.parse().unwrap_or(0)
}

fn weekday_code(s: &str) -> Option<Weekday> {
    match s {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// A comment starts at the first `#` that opens the title or follows
/// whitespace. Stripping only affects the parsed title; the raw line
/// is preserved elsewhere.
fn strip_title_comment(title: &str) -> &str {
    for (i, c) in title.char_indices() {
        if c == '#' && (i == 0 || title[..i].ends_with(|p: char| p.is_whitespace())) {
            return title[..i].trim_end();
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedTag {
        parse_tag_line(line).unwrap()
    }

    #[test]
    fn test_weekday_plain() {
        let tag = parse("[thu] Take out trash");
        assert_eq!(
            tag.rule,
            RecurrenceRule::Weekday {
                day: Weekday::Thu,
                period: 1,
                offset: 0
            }
        );
        assert_eq!(tag.modifier, Modifier::NONE);
        assert_eq!(tag.title, "Take out trash");
    }

    #[test]
    fn test_weekday_with_period_and_offset() {
        let tag = parse("[thu%2+1] Alternate Thursdays");
        assert_eq!(
            tag.rule,
            RecurrenceRule::Weekday {
                day: Weekday::Thu,
                period: 2,
                offset: 1
            }
        );
    }

    #[test]
    fn test_weekday_case_insensitive() {
        let tag = parse("[SUN] Weekly review");
        assert_eq!(
            tag.rule,
            RecurrenceRule::Weekday {
                day: Weekday::Sun,
                period: 1,
                offset: 0
            }
        );
    }

    #[test]
    fn test_epoch_units() {
        assert_eq!(
            parse("[D%5] Water plants").rule,
            RecurrenceRule::Every {
                unit: Unit::Day,
                period: 5,
                offset: 0
            }
        );
        assert_eq!(
            parse("[W%3+1] Laundry").rule,
            RecurrenceRule::Every {
                unit: Unit::Week,
                period: 3,
                offset: 1
            }
        );
        assert_eq!(
            parse("[M%3] Inspect roof").rule,
            RecurrenceRule::Every {
                unit: Unit::Month,
                period: 3,
                offset: 0
            }
        );
    }

    #[test]
    fn test_bare_epoch_units_default_to_period_one() {
        assert_eq!(
            parse("[W] Every Sunday").rule,
            RecurrenceRule::Every {
                unit: Unit::Week,
                period: 1,
                offset: 0
            }
        );
        assert_eq!(
            parse("[d] Every day").rule,
            RecurrenceRule::Every {
                unit: Unit::Day,
                period: 1,
                offset: 0
            }
        );
    }

    #[test]
    fn test_offset_at_or_above_period_rejected() {
        assert_eq!(
            parse_tag_line("[W%3+4] Too far").unwrap_err(),
            TagError::InvalidOffset {
                offset: 4,
                period: 3
            }
        );
        assert_eq!(
            parse_tag_line("[W%3+3] Aliases zero").unwrap_err(),
            TagError::InvalidOffset {
                offset: 3,
                period: 3
            }
        );
        // offset with no period means period 1
        assert_eq!(
            parse_tag_line("[thu+1] Offset needs a period").unwrap_err(),
            TagError::InvalidOffset {
                offset: 1,
                period: 1
            }
        );
    }

    #[test]
    fn test_day_of_month() {
        assert_eq!(parse("[D15] Rent").rule, RecurrenceRule::DayOfMonth(15));
        assert_eq!(parse("[d07] Invoice").rule, RecurrenceRule::DayOfMonth(7));
    }

    #[test]
    fn test_day_of_month_out_of_range_is_malformed() {
        assert!(matches!(
            parse_tag_line("[D32] Never").unwrap_err(),
            TagError::Malformed(_)
        ));
        assert!(matches!(
            parse_tag_line("[D00] Never").unwrap_err(),
            TagError::Malformed(_)
        ));
        // single digit is not part of the grammar
        assert!(matches!(
            parse_tag_line("[D7] Narrow").unwrap_err(),
            TagError::Malformed(_)
        ));
    }

    #[test]
    fn test_year_unit_rejected() {
        assert!(matches!(
            parse_tag_line("[Y%2] Biennial").unwrap_err(),
            TagError::Malformed(_)
        ));
    }

    #[test]
    fn test_fixed_dates() {
        assert_eq!(
            parse("[12-25] Christmas").rule,
            RecurrenceRule::FixedDate {
                month: 12,
                day: 25,
                year: None
            }
        );
        assert_eq!(
            parse("[3/15] Ides").rule,
            RecurrenceRule::FixedDate {
                month: 3,
                day: 15,
                year: None
            }
        );
        assert_eq!(
            parse("[2024-03-15]d One time").rule,
            RecurrenceRule::FixedDate {
                month: 3,
                day: 15,
                year: Some(2024)
            }
        );
    }

    #[test]
    fn test_bad_dates_rejected() {
        assert!(parse_tag_line("[13-01] Bad month").is_err());
        assert!(parse_tag_line("[0/5] Bad month").is_err());
        assert!(parse_tag_line("[12-32] Bad day").is_err());
    }

    #[test]
    fn test_any_bucket() {
        let tag = parse("[any] Read that book");
        assert_eq!(tag.rule, RecurrenceRule::Any);
        assert!(parse_tag_line("[any%2] Nope").is_err());
    }

    #[test]
    fn test_unterminated_and_malformed_brackets() {
        assert!(matches!(
            parse_tag_line("[thu Take out trash").unwrap_err(),
            TagError::Malformed(_)
        ));
        assert!(matches!(
            parse_tag_line(" [thu] Indented").unwrap_err(),
            TagError::Malformed(_)
        ));
        assert!(parse_tag_line("[] Empty").is_err());
        assert!(parse_tag_line("[someday] Maybe").is_err());
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(
            parse("[D%5]d Water plants").modifier,
            Modifier {
                run_as_command: false,
                disposition: Disposition::DeleteOnce
            }
        );
        assert_eq!(
            parse("[M%3]3 Inspect roof").modifier.disposition,
            Disposition::Counter(3)
        );
        assert_eq!(
            parse("[sun]c ~/bin/backup.sh").modifier,
            Modifier {
                run_as_command: true,
                disposition: Disposition::Recurring
            }
        );
        assert_eq!(
            parse("[sun]cd ~/bin/once.sh").modifier,
            Modifier {
                run_as_command: true,
                disposition: Disposition::DeleteOnce
            }
        );
        assert_eq!(
            parse("[sun]c2 ~/bin/twice.sh").modifier,
            Modifier {
                run_as_command: true,
                disposition: Disposition::Counter(2)
            }
        );
    }

    #[test]
    fn test_zero_counter_is_malformed() {
        assert!(matches!(
            parse_tag_line("[sun]0 Never").unwrap_err(),
            TagError::Malformed(_)
        ));
    }

    #[test]
    fn test_unknown_modifier_is_malformed() {
        assert!(matches!(
            parse_tag_line("[sun]x What").unwrap_err(),
            TagError::Malformed(_)
        ));
        assert!(matches!(
            parse_tag_line("[sun]dd Twice").unwrap_err(),
            TagError::Malformed(_)
        ));
    }

    #[test]
    fn test_title_comment_stripped() {
        assert_eq!(
            parse("[thu] Take out trash # bins are by the gate").title,
            "Take out trash"
        );
        // '#' not preceded by whitespace belongs to the title
        assert_eq!(parse("[thu] Buy item#42").title, "Buy item#42");
    }

    #[test]
    fn test_modifier_token_rendering() {
        assert_eq!(Modifier::NONE.token(), "");
        assert_eq!(
            Modifier {
                run_as_command: true,
                disposition: Disposition::Counter(4)
            }
            .token(),
            "c4"
        );
        assert_eq!(
            Modifier {
                run_as_command: false,
                disposition: Disposition::DeleteOnce
            }
            .token(),
            "d"
        );
    }
}
