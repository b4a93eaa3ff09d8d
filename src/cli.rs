// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: webscraper <URL> [options]. Every option maps
// one-to-one onto a CrawlConfig field; into_config() does the conversion and
// config.rs does the validation.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use webscraper::config::{
    default_user_agent, CrawlConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES,
    DEFAULT_TIMEOUT_SECS,
};

// #[derive(Parser)] generates the parsing code; doc comments become --help text
#[derive(Parser, Debug)]
#[command(
    name = "webscraper",
    version,
    about = "Crawl a website and extract emails, phone numbers, social handles, dates, addresses, prices and URLs",
    after_help = "EXAMPLES:\n    \
        webscraper https://example.com\n    \
        webscraper https://example.com -d 1 -p 20 -o report.json\n    \
        webscraper https://example.com --same-host --respect-robots -c 4\n    \
        RUST_LOG=webscraper=trace webscraper https://example.com"
)]
pub struct Cli {
    /// Seed URL to start crawling from (http or https)
    pub url: String,

    /// Maximum number of link hops from the seed (0 = only the seed)
    #[arg(short = 'd', long = "depth", default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Maximum number of pages to fetch
    #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Number of pages fetched at the same time
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Write the JSON report to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Log every page and link decision
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip pages disallowed by the seed's robots.txt
    #[arg(long)]
    pub respect_robots: bool,

    /// Only follow links on the seed's host
    #[arg(long)]
    pub same_host: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> (CrawlConfig, Option<PathBuf>) {
        let config = CrawlConfig {
            seed: self.url,
            max_depth: self.depth,
            max_pages: self.max_pages,
            timeout: Duration::from_secs(self.timeout),
            concurrency: self.concurrency,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            respect_robots: self.respect_robots,
            same_host: self.same_host,
        };
        (config, self.output)
    }
}
