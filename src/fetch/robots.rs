// src/fetch/robots.rs
// =============================================================================
// A deliberately small robots.txt check.
//
// Only the `User-agent: *` group of the seed's origin is read, and only its
// Allow/Disallow path prefixes. Wildcards, crawl-delay and sitemaps are not
// interpreted. URLs on other origins are always allowed.
// =============================================================================

use url::{Origin, Url};

use super::http::Fetcher;

#[derive(Debug, Clone, Default)]
pub struct RobotsRules {
    origin: Option<Origin>,
    allow: Vec<String>,
    disallow: Vec<String>,
}

impl RobotsRules {
    pub fn allow_all() -> Self {
        Self::default()
    }

    // Downloads /robots.txt for the seed's origin.
    //
    // Missing, unreachable or non-text robots files allow everything.
    pub async fn fetch(fetcher: &Fetcher, seed: &Url) -> Self {
        let Ok(robots_url) = seed.join("/robots.txt") else {
            return Self::allow_all();
        };

        match fetcher.fetch_text(robots_url.as_str()).await {
            Ok((_, body)) => {
                let rules = Self::parse(&body, seed);
                tracing::debug!(
                    url = %robots_url,
                    disallowed = rules.disallow.len(),
                    "loaded robots.txt"
                );
                rules
            }
            Err(error) => {
                tracing::debug!(url = %robots_url, %error, "no usable robots.txt, allowing all");
                Self::allow_all()
            }
        }
    }

    pub fn parse(body: &str, origin_url: &Url) -> Self {
        let mut rules = Self {
            origin: Some(origin_url.origin()),
            ..Self::default()
        };

        let mut in_star_group = false;
        let mut previous_was_agent = false;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match field.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    // consecutive User-agent lines share one group
                    if !previous_was_agent {
                        in_star_group = false;
                    }
                    in_star_group |= value == "*";
                    previous_was_agent = true;
                }
                "disallow" => {
                    previous_was_agent = false;
                    if in_star_group && !value.is_empty() {
                        rules.disallow.push(strip_wildcard(value));
                    }
                }
                "allow" => {
                    previous_was_agent = false;
                    if in_star_group && !value.is_empty() {
                        rules.allow.push(strip_wildcard(value));
                    }
                }
                _ => previous_was_agent = false,
            }
        }

        rules
    }

    // The longest matching prefix decides; Allow wins a tie.
    pub fn allows(&self, url: &Url) -> bool {
        match &self.origin {
            Some(origin) if *origin == url.origin() => {}
            _ => return true,
        }

        let target = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        let longest = |prefixes: &[String]| {
            prefixes
                .iter()
                .filter(|prefix| target.starts_with(prefix.as_str()))
                .map(String::len)
                .max()
        };

        match (longest(&self.allow), longest(&self.disallow)) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(allow), Some(disallow)) => allow >= disallow,
        }
    }
}

fn strip_wildcard(value: &str) -> String {
    value.trim_end_matches(['*', '$']).to_string()
}
