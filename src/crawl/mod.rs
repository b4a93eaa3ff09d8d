// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl.
//
// Submodules:
// - frontier: The queue of pages to fetch plus the set of pages already taken
// - scheduler: The bounded pool of concurrent fetches, cancellation, stats
// - observer: Hooks the scheduler calls as pages start, finish and fail
// =============================================================================

mod frontier;
mod observer;
mod scheduler;

pub use frontier::{normalize_url, CrawlTask, DropReason, Frontier};
pub use observer::{CrawlObserver, NullObserver, TracingObserver};
pub use scheduler::{CrawlError, CrawlOutcome, CrawlStats, Crawler};
