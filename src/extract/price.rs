// src/extract/price.rs
// =============================================================================
// Prices: a currency marker next to an amount.
//
//   $99.99   € 1,200   £5   USD 10.50   250 EUR
//
// Each match keeps its own currency, so "$10" and "€10" are different prices.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::{char_after, char_before, MatchSet};

const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?";
const CODES: &str = "USD|EUR|GBP|JPY|CAD|AUD|CHF|INR";

static SYMBOL_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[$€£¥₹][ \t]?{AMOUNT}")).expect("symbol price pattern is valid")
});

static CODE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{CODES})[ \t]?{AMOUNT}")).expect("code price pattern is valid")
});

static CODE_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{AMOUNT}[ \t]?(?:{CODES})\b")).expect("suffix price pattern is valid")
});

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for regex in [&*SYMBOL_FIRST, &*CODE_FIRST] {
        for found in regex.find_iter(text) {
            if ends_mid_number(text, found.end()) {
                continue;
            }
            insert(&mut matches, found.as_str());
        }
    }

    for found in CODE_LAST.find_iter(text) {
        // the amount has to start at a number boundary
        if char_before(text, found.start())
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, ',' | '.' | '$' | '€' | '£' | '¥' | '₹'))
        {
            continue;
        }
        insert(&mut matches, found.as_str());
    }

    matches
}

fn insert(matches: &mut MatchSet, raw: &str) {
    let key: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    matches.insert(key.to_uppercase(), raw);
}

// "$9.999" or "$1,23456" stop in the middle of a number
fn ends_mid_number(text: &str, end: usize) -> bool {
    char_after(text, end).is_some_and(|c| c.is_ascii_digit())
}
