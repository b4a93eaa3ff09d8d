// src/extract/phone.rs
// =============================================================================
// Phone numbers.
//
// Accepted shapes (separators are space, dash or dot):
//   +1-123-456-7890     (optional country code)
//   (555) 123-4567      (optional parentheses around the area code)
//   020 7946 0958
//   555-1234            (local number, dash or space only)
//
// A candidate must have 7-15 digits and must not be glued to other digits,
// which rules out dates, long IDs and the middle of bigger numbers.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::{char_after, char_before, two_chars_after, MatchSet};

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{1,4}\)[ .-]?|\d{2,4}[ .-])\d{3,4}[ .-]\d{3,4}",
        r"|\d{3}[ -]\d{4}",
    ))
    .expect("phone pattern is valid")
});

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for found in PHONE.find_iter(text) {
        if !is_isolated(text, found.start(), found.end()) {
            continue;
        }

        let number = found.as_str();
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            continue;
        }
        if looks_like_year_list(number) {
            continue;
        }

        let key = if number.starts_with('+') {
            format!("+{digits}")
        } else {
            digits
        };
        matches.insert(key, number);
    }

    matches
}

fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    if char_before(text, start).is_some_and(|c| c.is_alphanumeric() || c == '+' || c == '_') {
        return false;
    }
    match two_chars_after(text, end) {
        (Some(c), _) if c.is_alphanumeric() || c == '_' => false,
        // "555-123-4567-89" continues as a longer identifier
        (Some('-' | '.'), Some(next)) if next.is_ascii_digit() => false,
        _ => char_after(text, end) != Some('/'),
    }
}

// "2019 2020 2021" has the shape of a number but is a run of years
fn looks_like_year_list(number: &str) -> bool {
    let groups: Vec<&str> = number
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();
    groups.len() >= 2 && groups.iter().all(|g| g.len() == 4)
}
