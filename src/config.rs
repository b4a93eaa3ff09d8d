// src/config.rs
// =============================================================================
// Crawl configuration.
//
// The CLI (src/cli.rs) fills in a CrawlConfig; everything below the CLI only
// ever sees this struct. validate() runs once, before any network traffic,
// and is the only place a run can be rejected as a whole.
// =============================================================================

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONCURRENCY: usize = 8;

// Problems that stop a crawl before it starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("seed URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("max pages must be at least 1")]
    ZeroPages,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts. Depth 0.
    pub seed: String,
    /// Link hops allowed from the seed. 0 fetches only the seed.
    pub max_depth: usize,
    /// Upper bound on fetch attempts for the whole crawl.
    pub max_pages: usize,
    /// Per-fetch timeout.
    pub timeout: Duration,
    /// Number of fetches allowed in flight at once.
    pub concurrency: usize,
    pub user_agent: String,
    /// Skip URLs disallowed for `User-agent: *` in the seed's robots.txt.
    pub respect_robots: bool,
    /// Only follow links whose host matches the seed's host.
    pub same_host: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: default_user_agent(),
            respect_robots: false,
            same_host: false,
        }
    }
}

impl CrawlConfig {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    // Checks the limits and parses the seed.
    //
    // Returns the parsed seed so callers don't parse it a second time.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::ZeroPages);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        let seed = Url::parse(self.seed.trim()).map_err(|e| ConfigError::InvalidSeed {
            url: self.seed.clone(),
            reason: e.to_string(),
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(seed.scheme().to_string()));
        }
        if seed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidSeed {
                url: self.seed.clone(),
                reason: "missing host".to_string(),
            });
        }

        Ok(seed)
    }
}

pub fn default_user_agent() -> String {
    format!("webscraper/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::new("https://example.com");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_seed() {
        let config = CrawlConfig::new("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_seed() {
        let config = CrawlConfig::new("ftp://example.com/file");
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = CrawlConfig::new("https://example.com");
        config.max_pages = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPages));

        let mut config = CrawlConfig::new("https://example.com");
        config.concurrency = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));

        let mut config = CrawlConfig::new("https://example.com");
        config.timeout = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_zero_depth_is_allowed() {
        let mut config = CrawlConfig::new("https://example.com");
        config.max_depth = 0;
        assert!(config.validate().is_ok());
    }
}
