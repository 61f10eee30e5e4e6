//! Title clean-up.
//!
//! Strips date, time, and assignee fragments from the text left over after
//! priority and assignee extraction. Works on the whole vocabulary the date
//! extractor understands, not just the phrase it picked.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{MONTH_NAMES, WEEKDAY_NAMES};

/// Optional `at`/`on`/`by`/`due`/`until`/`before` words glued to a date.
const LEAD_IN: &str = r"(?:\b(?:at|on|by|due|until|before)\s+)*";

static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"{LEAD_IN}\btomorrow\b"),
        format!(r"{LEAD_IN}\btoday\b"),
        format!(r"{LEAD_IN}\bnext\s+(?:week|month|{WEEKDAY_NAMES})\b"),
        format!(r"{LEAD_IN}\bthis\s+(?:week|month)\b"),
        format!(r"{LEAD_IN}\b[0-9]{{1,2}}(?::[0-9]{{2}})?\s*(?:am|pm)\b"),
        format!(r"{LEAD_IN}\b[0-9]{{1,2}}:[0-9]{{2}}\b"),
        format!(r"{LEAD_IN}\b[0-9]{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTH_NAMES})\b"),
        format!(r"{LEAD_IN}\b(?:{MONTH_NAMES})\s+[0-9]{{1,2}}(?:st|nd|rd|th)?\b"),
        format!(r"{LEAD_IN}\b[0-9]{{1,2}}/[0-9]{{1,2}}\b"),
        format!(r"{LEAD_IN}\bin\s+[0-9]+\s+days?\b"),
        // trailing assignee phrase
        r"\b(?:by|to|for|assign(?:ed)?\s+to|give\s+to)\s+[a-z]+(?:\s+[a-z]+)*$".to_string(),
        // stray lead-ins
        r"\b(?:due|until|before)\s+".to_string(),
        // `at`/`on` in front of a number no rule read as a date
        r"\b(?:at|on)\s+[0-9]+\b".to_string(),
    ]
    .iter()
    .map(|pattern| {
        Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|e| panic!("Invalid title regex {pattern:?}: {e}"))
    })
    .collect()
});

/// Reduce leftover text to a clean title.
///
/// Removes every date/time fragment, collapses whitespace, and drops a
/// leading `and` or `&`. May return an empty string; the caller decides the
/// fallback.
#[must_use]
pub fn reduce_title(text: &str) -> String {
    let cleaned = NOISE_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, pattern| {
            pattern.replace_all(&acc, " ").trim().to_string()
        });

    let mut words = cleaned.split_whitespace().peekable();
    if words
        .peek()
        .is_some_and(|w| *w == "&" || w.eq_ignore_ascii_case("and"))
    {
        words.next();
    }

    words.collect::<Vec<_>>().join(" ")
}
