// src/extract/mod.rs
// =============================================================================
// Entity extraction.
//
// Every extractor is a plain function `fn(&str) -> MatchSet`. They share no
// state, never fail, and can run in any order over the same text. The
// ExtractorRegistry pairs each function with the EntityKind it produces, so
// the crawler runs "whatever is registered" without knowing the kinds.
//
// Submodules (one per kind):
// - email, phone, social, date, address, price, urls
// =============================================================================

mod address;
mod date;
mod email;
mod phone;
mod price;
mod social;
mod urls;

pub use social::is_profile_link;

use std::collections::btree_map::{BTreeMap, Entry};
use std::fmt;

use serde::Serialize;

// The categories of information we pull out of pages.
//
// Declaration order is the key order of the JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Email,
    Phone,
    Social,
    Url,
    Date,
    Address,
    Price,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Email,
        EntityKind::Phone,
        EntityKind::Social,
        EntityKind::Url,
        EntityKind::Date,
        EntityKind::Address,
        EntityKind::Price,
    ];

    // Name of the report field holding this kind
    pub fn report_key(self) -> &'static str {
        match self {
            EntityKind::Email => "emails",
            EntityKind::Phone => "phone_numbers",
            EntityKind::Social => "social_media",
            EntityKind::Url => "urls",
            EntityKind::Date => "dates",
            EntityKind::Address => "addresses",
            EntityKind::Price => "prices",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_key())
    }
}

/// A set of matches for one entity kind.
///
/// Each match has a normalized key (what makes two matches "the same") and a
/// display value (what ends up in the report). When two display values share
/// a key the lexicographically smaller one is kept, so the outcome does not
/// depend on the order pages were merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    by_key: BTreeMap<String, String>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.by_key.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                if value < *slot.get() {
                    slot.insert(value);
                }
            }
        }
    }

    pub fn merge(&mut self, other: MatchSet) {
        for (key, value) in other.by_key {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, value: &str) -> bool {
        self.by_key.values().any(|v| v == value)
    }

    // Display values sorted for deterministic output
    pub fn into_sorted_values(self) -> Vec<String> {
        let mut values: Vec<String> = self.by_key.into_values().collect();
        values.sort();
        values
    }
}

pub type ExtractFn = fn(&str) -> MatchSet;

/// The `(kind, extractor)` pairs run over every fetched page.
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: Vec<(EntityKind, ExtractFn)>,
}

impl ExtractorRegistry {
    // A registry with nothing in it
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    pub fn register(&mut self, kind: EntityKind, extract: ExtractFn) {
        self.extractors.push((kind, extract));
    }

    pub fn with(mut self, kind: EntityKind, extract: ExtractFn) -> Self {
        self.register(kind, extract);
        self
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    // Runs every registered extractor over the text.
    // Kinds with no matches are left out.
    pub fn run(&self, text: &str) -> Vec<(EntityKind, MatchSet)> {
        self.extractors
            .iter()
            .map(|(kind, extract)| (*kind, extract(text)))
            .filter(|(_, matches)| !matches.is_empty())
            .collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::empty()
            .with(EntityKind::Email, email::extract)
            .with(EntityKind::Phone, phone::extract)
            .with(EntityKind::Social, social::extract)
            .with(EntityKind::Url, urls::extract)
            .with(EntityKind::Date, date::extract)
            .with(EntityKind::Address, address::extract)
            .with(EntityKind::Price, price::extract)
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.extractors.iter().map(|(kind, _)| kind))
            .finish()
    }
}

// Character right before byte offset `start`, if any
fn char_before(text: &str, start: usize) -> Option<char> {
    text[..start].chars().next_back()
}

// Character at byte offset `end`, if any
fn char_after(text: &str, end: usize) -> Option<char> {
    text[end..].chars().next()
}

// The two characters starting at byte offset `end`
fn two_chars_after(text: &str, end: usize) -> (Option<char>, Option<char>) {
    let mut rest = text[end..].chars();
    (rest.next(), rest.next())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_set_dedupes_by_key() {
        let mut set = MatchSet::new();
        set.insert("a@b.com", "a@b.com");
        set.insert("a@b.com", "A@B.com");
        assert_eq!(set.len(), 1);
        // "A@B.com" sorts before "a@b.com"
        assert_eq!(set.into_sorted_values(), vec!["A@B.com"]);
    }

    #[test]
    fn test_match_set_merge_is_order_independent() {
        let mut left = MatchSet::new();
        left.insert("x", "X");
        let mut right = MatchSet::new();
        right.insert("x", "x");
        right.insert("y", "y");

        let mut a = left.clone();
        a.merge(right.clone());
        let mut b = right;
        b.merge(left);
        assert_eq!(a, b);
    }

    #[test]
    fn test_registry_runs_every_kind() {
        let registry = ExtractorRegistry::default();
        assert_eq!(registry.len(), EntityKind::ALL.len());

        let text = "Mail a@b.com, call (555) 123-4567, follow @rustlang, \
                    see https://example.com/x on 2024-01-01 at 123 Main St for $99.99";
        let results = registry.run(text);
        let kinds: Vec<EntityKind> = results.iter().map(|(kind, _)| *kind).collect();
        for kind in EntityKind::ALL {
            assert!(kinds.contains(&kind), "missing {kind}");
        }
    }

    #[test]
    fn test_registry_skips_empty_results() {
        let registry = ExtractorRegistry::default();
        assert!(registry.run("").is_empty());
        assert!(registry.run("nothing to see here").is_empty());
    }

    #[test]
    fn test_custom_registry() {
        fn shout(text: &str) -> MatchSet {
            let mut set = MatchSet::new();
            for word in text.split_whitespace().filter(|w| w.ends_with('!')) {
                set.insert(word.to_lowercase(), word);
            }
            set
        }

        let registry = ExtractorRegistry::empty().with(EntityKind::Social, shout);
        let results = registry.run("hey! HEY! you");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1.len(), 1);
    }

    #[test]
    fn test_report_keys() {
        let keys: Vec<&str> = EntityKind::ALL.iter().map(|k| k.report_key()).collect();
        assert_eq!(
            keys,
            vec![
                "emails",
                "phone_numbers",
                "social_media",
                "urls",
                "dates",
                "addresses",
                "prices"
            ]
        );
    }
}
