// src/extract/social.rs
// =============================================================================
// Social media handles and profile paths.
//
// Two sources:
// - "@handle" tokens (letters, digits, underscore; 1-30 chars)
// - profile paths on known platforms, e.g. twitter.com/rustlang or
//   linkedin.com/in/jane-doe
//
// The "@" of an email address is never a handle: the character in front of
// it has to be a non-word character.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

use super::{char_before, two_chars_after, MatchSet};

static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]{1,30})").expect("handle pattern is valid"));

static PLATFORM_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://)?(?:www\.|m\.)?(facebook\.com|fb\.com|twitter\.com|instagram\.com|github\.com|youtube\.com)/(@?[A-Za-z0-9_.-]+)",
    )
    .expect("platform pattern is valid")
});

static LINKEDIN_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://)?(?:[a-z]{2,3}\.|www\.)?linkedin\.com/(in|company)/([A-Za-z0-9_-]+)")
        .expect("linkedin pattern is valid")
});

// Paths on the platforms that are pages of the site itself, not profiles
const RESERVED: &[&str] = &[
    "sharer", "share", "intent", "home", "login", "search", "hashtag", "watch", "explore",
    "about", "privacy", "policies", "help", "settings",
];

// True for links to a profile on a known platform. Icon-only anchors carry
// no text, so the page parser appends these targets to the text it extracts.
pub fn is_profile_link(href: &str) -> bool {
    PLATFORM_PATH.is_match(href) || LINKEDIN_PATH.is_match(href)
}

pub fn extract(text: &str) -> MatchSet {
    let mut matches = MatchSet::new();
    extract_handles(text, &mut matches);
    extract_platform_paths(text, &mut matches);
    matches
}

fn extract_handles(text: &str, matches: &mut MatchSet) {
    for caps in HANDLE.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        // email local part, URL path segment ("medium.com/@x"), or "@@"
        if char_before(text, whole.start())
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | '@' | '/'))
        {
            continue;
        }
        match two_chars_after(text, whole.end()) {
            // longer than 30 characters
            (Some(c), _) if c.is_alphanumeric() || c == '_' => continue,
            // "@example.com" is a domain, not a handle
            (Some('.'), Some(next)) if next.is_alphanumeric() => continue,
            (Some('@'), _) => continue,
            _ => {}
        }

        let name = name.as_str();
        if !name.chars().any(|c| c.is_ascii_alphabetic()) {
            continue;
        }

        let handle = format!("@{name}");
        matches.insert(handle.to_lowercase(), handle);
    }
}

fn extract_platform_paths(text: &str, matches: &mut MatchSet) {
    for caps in PLATFORM_PATH.captures_iter(text) {
        let (Some(domain), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().trim_end_matches(['.', '-']);
        if name.is_empty() || is_reserved(name) {
            continue;
        }

        let value = format!("{}/{}", domain.as_str().to_lowercase(), name);
        matches.insert(value.to_lowercase(), value);
    }

    for caps in LINKEDIN_PATH.captures_iter(text) {
        let (Some(section), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().trim_end_matches('-');
        if name.is_empty() {
            continue;
        }

        let value = format!("linkedin.com/{}/{}", section.as_str().to_lowercase(), name);
        matches.insert(value.to_lowercase(), value);
    }
}

fn is_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles() {
        let found = extract("Follow @rustlang and @Tokio_rs!");
        assert_eq!(found.into_sorted_values(), vec!["@Tokio_rs", "@rustlang"]);
    }

    #[test]
    fn test_email_is_not_a_handle() {
        assert!(extract("write to a@b.com").is_empty());
        assert!(extract("or to @example.com").is_empty());
    }

    #[test]
    fn test_handle_length_limit() {
        let long = format!("@{}", "a".repeat(31));
        assert!(extract(&long).is_empty());
        let max = format!("@{}", "a".repeat(30));
        assert_eq!(extract(&max).len(), 1);
    }

    #[test]
    fn test_handle_at_end_of_sentence() {
        let found = extract("Ping @ferris.");
        assert_eq!(found.into_sorted_values(), vec!["@ferris"]);
    }

    #[test]
    fn test_platform_paths() {
        let found = extract(
            "Find us on https://www.facebook.com/RustLang, twitter.com/rustlang and \
             instagram.com/rust.lang.",
        );
        let values = found.into_sorted_values();
        assert!(values.contains(&"facebook.com/RustLang".to_string()));
        assert!(values.contains(&"twitter.com/rustlang".to_string()));
        assert!(values.contains(&"instagram.com/rust.lang".to_string()));
    }

    #[test]
    fn test_linkedin() {
        let found = extract("https://www.linkedin.com/in/jane-doe and linkedin.com/company/acme");
        let values = found.into_sorted_values();
        assert_eq!(
            values,
            vec!["linkedin.com/company/acme", "linkedin.com/in/jane-doe"]
        );
    }

    #[test]
    fn test_skips_share_links() {
        assert!(extract("facebook.com/sharer.php?u=x twitter.com/intent/tweet").is_empty());
    }

    #[test]
    fn test_lookalike_domains_are_ignored() {
        assert!(extract("notfacebook.com/someone").is_empty());
    }

    #[test]
    fn test_garbage_input() {
        assert!(extract("").is_empty());
        assert!(extract("@ @@ @123 /@/").is_empty());
    }
}
