// src/extract/email.rs
// =============================================================================
// Email addresses: local@domain.tld
//
// Matches are de-duplicated case-insensitively but keep the case they were
// written in. Raw `mailto:` targets appended to the page text by the fetcher
// are picked up here too, since the scheme stops at the ':'.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::{char_after, MatchSet};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}")
        .expect("email pattern is valid")
});

// Image names like logo@2x.png look exactly like addresses
const FILE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for found in EMAIL.find_iter(text) {
        // A letter or digit right after the TLD means we stopped mid-token
        if char_after(text, found.end()).is_some_and(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }

        let address = found.as_str().trim_start_matches('.');
        let Some((local, _domain)) = address.split_once('@') else {
            continue;
        };
        if local.is_empty() || local.ends_with('.') || local.contains("..") {
            continue;
        }

        let key = address.to_lowercase();
        if FILE_SUFFIXES.iter().any(|suffix| key.ends_with(suffix)) {
            continue;
        }
        matches.insert(key, address);
    }

    matches
}
