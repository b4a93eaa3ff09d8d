// src/extract/urls.rs
// =============================================================================
// Absolute http(s) URLs written in the page text.
//
// These are URLs a reader can see ("docs live at https://docs.rs/x"), not the
// page's <a href> targets; the fetcher handles those separately.
// =============================================================================

use std::sync::LazyLock;

use ::url::Url;
use regex::Regex;

use super::MatchSet;

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[^\s<>"'`{}|\\^\[\]]+"#).expect("url pattern is valid")
});

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();

    for found in URL.find_iter(text) {
        let candidate = trim_trailing_punctuation(found.as_str());

        let Ok(parsed) = Url::parse(candidate) else {
            continue;
        };
        if parsed.host_str().map_or(true, str::is_empty) {
            continue;
        }
        matches.insert(parsed.to_string(), candidate);
    }

    matches
}

// Sentence punctuation after a URL is not part of it. A closing paren only
// belongs to the URL when the URL also opened one (wiki-style links).
fn trim_trailing_punctuation(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let trimmed = if trimmed.ends_with(')') && !trimmed.contains('(') {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_in_text() {
        let found = extract("Docs: https://docs.rs/tokio. Source at http://github.com/tokio-rs/tokio!");
        assert_eq!(
            found.into_sorted_values(),
            vec!["http://github.com/tokio-rs/tokio", "https://docs.rs/tokio"]
        );
    }

    #[test]
    fn test_parenthesized_url() {
        let found = extract("(see https://example.com/a)");
        assert_eq!(found.into_sorted_values(), vec!["https://example.com/a"]);

        let found = extract("https://en.wikipedia.org/wiki/Rust_(programming_language)");
        assert_eq!(
            found.into_sorted_values(),
            vec!["https://en.wikipedia.org/wiki/Rust_(programming_language)"]
        );
    }

    #[test]
    fn test_keeps_query_strings() {
        let found = extract("https://example.com/list?page=2 https://example.com/list?page=3");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_host_case_is_normalized() {
        let found = extract("https://EXAMPLE.com/x and https://example.com/x");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_ignores_other_schemes() {
        assert!(extract("ftp://example.com mailto:a@b.com javascript:void(0)").is_empty());
    }

    #[test]
    fn test_garbage_input() {
        assert!(extract("").is_empty());
        assert!(extract("http:// https://").is_empty());
    }
}
