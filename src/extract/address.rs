// src/extract/address.rs
// =============================================================================
// Street addresses (US style).
//
//   123 Main St
//   1600 Pennsylvania Avenue NW, Washington, DC 20500
//   42 Elm Rd, Suite 4, Springfield, IL 62701
//
// This is a heuristic. When in doubt it leaves a candidate out: street words
// must be capitalized, stay on one line, and must not be filler words such
// as "The" or "Of" (that keeps "In 2020 The Court ruled" out).
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::{collapse_whitespace, MatchSet};

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        // house number
        r"\b\d{1,6}(?:-\d{1,6})?[ \t]+",
        // street name words
        r"((?:[A-Z][A-Za-z0-9'.-]*[ \t]+){1,4})",
        // street type
        r"(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Place|Pl|Terrace|Ter|Parkway|Pkwy|Highway|Hwy)\b\.?",
        // compass suffix
        r"(?:[ \t]+(?:N|S|E|W|NE|NW|SE|SW)\b)?",
        // unit
        r"(?:,?[ \t]+(?:Suite|Ste|Apt|Unit|#)[ \t]*[A-Za-z0-9-]+)?",
        // city, state, zip
        r"(?:,[ \t]*[A-Z][A-Za-z]+(?:[ \t]+[A-Z][A-Za-z]+){0,2},[ \t]*[A-Z]{2}(?:[ \t]+\d{5}(?:-\d{4})?)?)?",
    ))
    .expect("address pattern is valid")
});

const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "of", "and", "or", "in", "on", "at", "for", "to", "by", "from", "with",
];

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for caps in ADDRESS.captures_iter(text) {
        let Some(street) = caps.get(1) else { continue };
        let has_filler = street
            .as_str()
            .split_whitespace()
            .any(|word| FILLER_WORDS.iter().any(|f| f.eq_ignore_ascii_case(word)));
        if has_filler {
            continue;
        }

        let value = collapse_whitespace(&caps[0]);
        let value = value.trim_end_matches(['.', ',']);
        matches.insert(value.to_lowercase(), value);
    }

    matches
}
