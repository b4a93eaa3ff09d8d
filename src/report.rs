// src/report.rs
// =============================================================================
// Result aggregation.
//
// The Aggregator collects matches from every page while the crawl runs.
// finalize() consumes it, so once a Report exists nothing can be merged
// into it anymore.
// =============================================================================

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;

use crate::extract::{EntityKind, MatchSet};

#[derive(Debug, Default)]
pub struct Aggregator {
    sets: Mutex<BTreeMap<EntityKind, MatchSet>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    // Unions `matches` into the set for `kind`. Safe to call from many
    // fetches at once.
    pub fn merge(&self, kind: EntityKind, matches: MatchSet) {
        if matches.is_empty() {
            return;
        }
        self.sets.lock().entry(kind).or_default().merge(matches);
    }

    pub fn finalize(self) -> Report {
        let mut sets = self.sets.into_inner();
        let mut take = |kind: EntityKind| {
            sets.remove(&kind)
                .map(MatchSet::into_sorted_values)
                .unwrap_or_default()
        };

        Report {
            emails: take(EntityKind::Email),
            phone_numbers: take(EntityKind::Phone),
            social_media: take(EntityKind::Social),
            urls: take(EntityKind::Url),
            dates: take(EntityKind::Date),
            addresses: take(EntityKind::Address),
            prices: take(EntityKind::Price),
        }
    }
}

/// The final, sorted, de-duplicated crawl result.
///
/// Field order is the key order of the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub social_media: Vec<String>,
    pub urls: Vec<String>,
    pub dates: Vec<String>,
    pub addresses: Vec<String>,
    pub prices: Vec<String>,
}

impl Report {
    pub fn get(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Email => &self.emails,
            EntityKind::Phone => &self.phone_numbers,
            EntityKind::Social => &self.social_media,
            EntityKind::Url => &self.urls,
            EntityKind::Date => &self.dates,
            EntityKind::Address => &self.addresses,
            EntityKind::Price => &self.prices,
        }
    }

    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn set(values: &[&str]) -> MatchSet {
        let mut set = MatchSet::new();
        for value in values {
            set.insert(value.to_lowercase(), *value);
        }
        set
    }

    #[test]
    fn test_merge_unions_and_sorts() {
        let aggregator = Aggregator::new();
        aggregator.merge(EntityKind::Email, set(&["b@x.com", "a@x.com"]));
        aggregator.merge(EntityKind::Email, set(&["a@x.com", "c@x.com"]));
        aggregator.merge(EntityKind::Date, set(&["2024-01-01"]));

        let report = aggregator.finalize();
        assert_eq!(report.emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(report.dates, vec!["2024-01-01"]);
        assert!(report.prices.is_empty());
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_concurrent_merges() {
        let aggregator = Arc::new(Aggregator::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let aggregator = Arc::clone(&aggregator);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        // every thread inserts the same 100 values plus one of its own
                        aggregator.merge(EntityKind::Url, set(&[format!("https://x.com/{i}").as_str()]));
                    }
                    aggregator.merge(EntityKind::Url, set(&[format!("https://t.com/{t}").as_str()]));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let aggregator = Arc::try_unwrap(aggregator).expect("all threads joined");
        assert_eq!(aggregator.finalize().urls.len(), 108);
    }

    #[test]
    fn test_json_key_order() {
        let report = Report {
            emails: vec!["a@b.com".into()],
            prices: vec!["$99.99".into()],
            ..Report::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        let keys = [
            "emails",
            "phone_numbers",
            "social_media",
            "urls",
            "dates",
            "addresses",
            "prices",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
