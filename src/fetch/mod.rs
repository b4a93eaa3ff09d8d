// src/fetch/mod.rs
// =============================================================================
// This module contains everything that touches the network or raw HTML.
//
// Submodules:
// - http: Downloads pages and classifies failures
// - html: Extracts visible text and links from HTML
// - robots: The optional robots.txt check
// =============================================================================

mod html;
mod http;
mod robots;

pub use http::{FetchError, Fetcher, PageResult, PageStatus};
pub use robots::RobotsRules;
