// src/extract/date.rs
// =============================================================================
// Calendar dates.
//
// Recognized forms:
//   2024-01-20         ISO
//   15 Jan 2024        day month year (full or abbreviated month, "15th" ok)
//   January 15, 2024   month day, year
//   01/20/2024         month/day/year
//
// Every candidate is checked against the real calendar with chrono, so
// "2024-99-99" or "31 Feb 2024" never make it into the report.
// =============================================================================

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use super::{char_after, char_before, collapse_whitespace, two_chars_after, MatchSet};

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("iso date pattern is valid"));

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH})\.?,?\s+(\d{{4}})\b"
    ))
    .expect("day-month-year pattern is valid")
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .expect("month-day-year pattern is valid")
});

static SLASHED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2})/(\d{2})/(\d{4})\b").expect("slashed date pattern is valid")
});

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for caps in ISO.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if !iso_is_isolated(text, whole.start(), whole.end()) {
            continue;
        }
        if is_valid(number(&caps, 1), number(&caps, 2), number(&caps, 3)) {
            insert(&mut matches, whole.as_str());
        }
    }

    for caps in DAY_MONTH_YEAR.captures_iter(text) {
        let month = caps.get(2).and_then(|m| month_number(m.as_str()));
        if is_valid(number(&caps, 3), month, number(&caps, 1)) {
            insert(&mut matches, &caps[0]);
        }
    }

    for caps in MONTH_DAY_YEAR.captures_iter(text) {
        let month = caps.get(1).and_then(|m| month_number(m.as_str()));
        if is_valid(number(&caps, 3), month, number(&caps, 2)) {
            insert(&mut matches, &caps[0]);
        }
    }

    for caps in SLASHED.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // part of a path like /2024/01/20/01/02/2024
        if char_after(text, whole.end()) == Some('/') || char_before(text, whole.start()) == Some('/') {
            continue;
        }
        if is_valid(number(&caps, 3), number(&caps, 1), number(&caps, 2)) {
            insert(&mut matches, whole.as_str());
        }
    }

    matches
}

fn insert(matches: &mut MatchSet, raw: &str) {
    let value = collapse_whitespace(raw);
    matches.insert(value.to_lowercase(), value);
}

// ISO dates are commonly followed by a time ("2024-01-20T10:00"), so a letter
// after the match is fine; another digit or "-<digit>" is not.
fn iso_is_isolated(text: &str, start: usize, end: usize) -> bool {
    if char_before(text, start).is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '/') {
        return false;
    }
    !matches!(
        two_chars_after(text, end),
        (Some('0'..='9'), _) | (Some('-' | '/'), Some('0'..='9'))
    )
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn is_valid(year: Option<u32>, month: Option<u32>, day: Option<u32>) -> bool {
    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .is_some(),
        _ => false,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_and_human_forms() {
        let found = extract("Meeting on 15 Jan 2024 and again 2024-01-20");
        assert_eq!(found.into_sorted_values(), vec!["15 Jan 2024", "2024-01-20"]);
    }

    #[test]
    fn test_invalid_calendar_values() {
        assert!(extract("Item ID 2024-99-99").is_empty());
        assert!(extract("31 Feb 2024").is_empty());
        assert!(extract("13/45/2024").is_empty());
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(extract("2024-02-29").len(), 1);
        assert!(extract("2023-02-29").is_empty());
    }

    #[test]
    fn test_month_day_year() {
        let found = extract("Released January 5, 2023 and Sept. 12 2022.");
        let values = found.into_sorted_values();
        assert!(values.contains(&"January 5, 2023".to_string()));
        assert!(values.contains(&"Sept. 12 2022".to_string()));
    }

    #[test]
    fn test_ordinal_days_and_full_months() {
        let found = extract("Due 3rd March 2025");
        assert_eq!(found.into_sorted_values(), vec!["3rd March 2025"]);
    }

    #[test]
    fn test_slashed_dates() {
        let found = extract("Posted 12/25/2023");
        assert_eq!(found.into_sorted_values(), vec!["12/25/2023"]);
    }

    #[test]
    fn test_iso_with_time() {
        let found = extract("updated 2024-03-01T10:00:00Z");
        assert_eq!(found.into_sorted_values(), vec!["2024-03-01"]);
    }

    #[test]
    fn test_iso_inside_longer_numbers() {
        assert!(extract("12024-01-201").is_empty());
        assert!(extract("v2024-01-20").is_empty());
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let found = extract("15  Jan\n2024 and 15 jan 2024");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_garbage_input() {
        assert!(extract("").is_empty());
        assert!(extract("99 Foo 2024 -- 00/00/0000").is_empty());
    }
}
