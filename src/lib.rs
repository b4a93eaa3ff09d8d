// src/lib.rs
// =============================================================================
// webscraper: crawl a website breadth-first and pull contact details and
// other entities out of every page.
//
// Module layout:
// - config: CrawlConfig and its validation
// - fetch: HTTP, HTML text/link extraction, robots.txt
// - extract: The entity extractors and the registry that runs them
// - crawl: Frontier, concurrent scheduler, observer hooks
// - report: Merges per-page matches into the final sorted report
// - output: Writes the report as JSON
// - logging: tracing subscriber setup for the binary
// =============================================================================

pub mod config;
pub mod crawl;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod report;
