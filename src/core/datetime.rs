//! Date and time extraction for natural language task input.
//!
//! Two independent searches run over the same text: one for a clock time and
//! one for a calendar date. Each search walks an ordered table of rules and
//! stops at the first rule whose pattern matches, even if that rule then
//! fails to produce a valid value. The two results are combined into a single
//! local timestamp.
//!
//! Supported phrases:
//! - `3:30pm`, `3 pm`, `15:00`
//! - `tomorrow`, `today`
//! - `next week`, `next month`, `this week`, `this month`
//! - `15 april`, `15th apr`, `april 15`, `apr 15th`, `4/15`
//! - `in 3 days`
//! - `next monday`, `next fri`

use chrono::{
    DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Regex alternation of month names, long forms ahead of their abbreviations.
pub(crate) const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|\
september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Regex alternation of weekday names, long forms ahead of their abbreviations.
pub(crate) const WEEKDAY_NAMES: &str =
    "monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|wed|thu|fri|sat|sun";

/// A clock time in 24-hour form as written by the user.
///
/// The values are not range-checked: `25:00` is representable here and is
/// rejected only when combined with a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// Hour, 0-23 when valid.
    pub hour: u32,
    /// Minute, 0-59 when valid.
    pub minute: u32,
}

/// Outcome of a first-match-wins search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection<T> {
    /// No rule matched.
    Missing,
    /// A rule matched and produced a value.
    Found(T),
    /// A rule matched but its value is not a real date.
    Malformed,
}

struct TimeRule {
    pattern: Regex,
    resolve: fn(&Captures<'_>) -> Option<TimeOfDay>,
}

struct DateRule {
    name: &'static str,
    pattern: Regex,
    resolve: fn(&Captures<'_>, NaiveDateTime) -> Option<NaiveDate>,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid date/time regex {pattern:?}: {e}"))
}

static TIME_RULES: Lazy<Vec<TimeRule>> = Lazy::new(|| {
    vec![
        // 3:30pm, 10:15 am
        TimeRule {
            pattern: compile(r"(?i)\b([0-9]{1,2}):([0-9]{2})\s*(am|pm)\b"),
            resolve: |caps| {
                let hour = caps[1].parse().ok()?;
                let minute = caps[2].parse().ok()?;
                Some(twelve_hour(hour, minute, &caps[3]))
            },
        },
        // 3pm, 9 am
        TimeRule {
            pattern: compile(r"(?i)\b([0-9]{1,2})\s*(am|pm)\b"),
            resolve: |caps| {
                let hour = caps[1].parse().ok()?;
                Some(twelve_hour(hour, 0, &caps[2]))
            },
        },
        // 15:00
        TimeRule {
            pattern: compile(r"\b([0-9]{1,2}):([0-9]{2})\b"),
            resolve: |caps| {
                Some(TimeOfDay {
                    hour: caps[1].parse().ok()?,
                    minute: caps[2].parse().ok()?,
                })
            },
        },
    ]
});

static DATE_RULES: Lazy<Vec<DateRule>> = Lazy::new(|| {
    vec![
        DateRule {
            name: "tomorrow",
            pattern: compile(r"(?i)\btomorrow\b"),
            resolve: |_, now| now.date().checked_add_days(Days::new(1)),
        },
        DateRule {
            name: "today",
            pattern: compile(r"(?i)\btoday\b"),
            resolve: |_, now| Some(now.date()),
        },
        DateRule {
            name: "next week/month",
            pattern: compile(r"(?i)\bnext\s+(week|month)\b"),
            resolve: |caps, now| {
                if caps[1].eq_ignore_ascii_case("week") {
                    now.date().checked_add_days(Days::new(7))
                } else {
                    add_month_overflowing(now.date())
                }
            },
        },
        // Both are fixed offsets, not calendar boundaries.
        DateRule {
            name: "this week/month",
            pattern: compile(r"(?i)\bthis\s+(week|month)\b"),
            resolve: |caps, now| {
                let days = if caps[1].eq_ignore_ascii_case("week") { 3 } else { 7 };
                now.date().checked_add_days(Days::new(days))
            },
        },
        DateRule {
            name: "day month",
            pattern: compile(&format!(
                r"(?i)\b([0-9]{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_NAMES})\b"
            )),
            resolve: |caps, now| {
                let day = caps[1].parse().ok()?;
                let month = parse_month_name(&caps[2])?;
                upcoming_month_day(month, day, now)
            },
        },
        DateRule {
            name: "month day",
            pattern: compile(&format!(
                r"(?i)\b({MONTH_NAMES})\s+([0-9]{{1,2}})(?:st|nd|rd|th)?\b"
            )),
            resolve: |caps, now| {
                let month = parse_month_name(&caps[1])?;
                let day = caps[2].parse().ok()?;
                upcoming_month_day(month, day, now)
            },
        },
        DateRule {
            name: "numeric month/day",
            pattern: compile(r"\b([0-9]{1,2})/([0-9]{1,2})\b"),
            resolve: |caps, now| {
                let month = caps[1].parse().ok()?;
                let day = caps[2].parse().ok()?;
                upcoming_month_day(month, day, now)
            },
        },
        DateRule {
            name: "in N days",
            pattern: compile(r"(?i)\bin\s+([0-9]+)\s+days?\b"),
            resolve: |caps, now| {
                let days: u64 = caps[1].parse().ok()?;
                now.date().checked_add_days(Days::new(days))
            },
        },
        DateRule {
            name: "next weekday",
            pattern: compile(&format!(r"(?i)\bnext\s+({WEEKDAY_NAMES})\b")),
            resolve: |caps, now| {
                let target = parse_weekday(&caps[1])?;
                next_weekday(now.date(), target)
            },
        },
    ]
});

/// Extract a due timestamp from free text.
///
/// A date with a time uses that time; a time alone lands on today; a date
/// alone lands on midnight. Anything that does not form a real instant
/// (`feb 30`, `25:00`, `13pm`, `13/40`) yields `None`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use taskflow::core::extract_due_date;
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 14)
///     .and_then(|d| d.and_hms_opt(10, 30, 0))
///     .unwrap();
/// let due = extract_due_date("ship it tomorrow 3pm", now).unwrap();
/// assert_eq!(due.to_string(), "2026-10-15 15:00:00");
/// ```
#[must_use]
pub fn extract_due_date(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let time = find_time_of_day(text);
    let date = match find_date(text, now) {
        Detection::Found(date) => date,
        Detection::Malformed => return None,
        Detection::Missing if time.is_some() => now.date(),
        Detection::Missing => return None,
    };

    match time {
        Some(TimeOfDay { hour, minute }) => date.and_hms_opt(hour, minute, 0),
        None => date.and_hms_opt(0, 0, 0),
    }
}

/// Find the first clock time in the text.
#[must_use]
pub fn find_time_of_day(text: &str) -> Option<TimeOfDay> {
    TIME_RULES.iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        let time = (rule.resolve)(&caps);
        tracing::trace!(matched = &caps[0], ?time, "time-of-day rule hit");
        time
    })
}

/// Find the first calendar date in the text, resolved against `now`.
#[must_use]
pub fn find_date(text: &str, now: NaiveDateTime) -> Detection<NaiveDate> {
    for rule in DATE_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            let date = (rule.resolve)(&caps, now);
            tracing::trace!(rule = rule.name, matched = &caps[0], ?date, "date rule hit");
            return date.map_or(Detection::Malformed, Detection::Found);
        }
    }
    Detection::Missing
}

fn twelve_hour(hour: u32, minute: u32, meridiem: &str) -> TimeOfDay {
    let is_pm = meridiem.eq_ignore_ascii_case("pm");
    let hour = match hour {
        12 if !is_pm => 0,
        h if is_pm && h != 12 => h + 12,
        h => h,
    };
    TimeOfDay { hour, minute }
}

/// Same day-of-month in the following month, spilling into the month after
/// when that day does not exist (Jan 31 becomes Mar 3 in a common year).
fn add_month_overflowing(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// The given month/day in the current year, or next year once its midnight
/// has passed.
fn upcoming_month_day(month: u32, day: u32, now: NaiveDateTime) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(now.year(), month, day)?;
    if date.and_hms_opt(0, 0, 0)? < now {
        NaiveDate::from_ymd_opt(now.year() + 1, month, day)
    } else {
        Some(date)
    }
}

/// The next occurrence of `target` strictly after `today`.
fn next_weekday(today: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let days_until =
        (7 + target.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    let days_until = if days_until == 0 { 7 } else { days_until };
    today.checked_add_days(Days::new(u64::from(days_until)))
}

/// Parse month name to number.
pub(crate) fn parse_month_name(input: &str) -> Option<u32> {
    match input.to_ascii_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse weekday names.
fn parse_weekday(input: &str) -> Option<Weekday> {
    match input.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse an explicit timestamp typed or stored by a user.
///
/// Accepts RFC 3339 (converted to local time), `YYYY-MM-DDTHH:MM[:SS[.f]]`,
/// the same with a space separator, and a bare `YYYY-MM-DD` (midnight).
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(Local.from_utc_datetime(&dt.naive_utc()).naive_local());
    }

    const FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::default()))
        })
}

/// Format a timestamp for storage and JSON output.
#[must_use]
pub fn to_storage_string(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Format a due date for display, e.g. `Thu, Oct 15, 3:00 PM`.
#[must_use]
pub fn format_due(dt: &NaiveDateTime) -> String {
    dt.format("%a, %b %-d, %-I:%M %p").to_string()
}

/// Format a date the way task summaries show it, e.g. `10/15/2026`.
#[must_use]
pub fn format_short_date(dt: &NaiveDateTime) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}
