// src/crawl/observer.rs
// =============================================================================
// Crawl events.
//
// The scheduler never logs directly. It reports what happens to a
// CrawlObserver handed to it at construction; the binary passes a
// TracingObserver, tests pass something that records events.
// =============================================================================

use super::frontier::{CrawlTask, DropReason};
use crate::fetch::FetchError;

pub trait CrawlObserver: Send + Sync {
    fn crawl_started(&self, _seed: &str) {}

    fn page_started(&self, _task: &CrawlTask) {}

    fn page_succeeded(&self, _task: &CrawlTask, _matches: usize, _links: usize) {}

    fn page_failed(&self, _task: &CrawlTask, _error: &FetchError) {}

    fn link_dropped(&self, _url: &str, _depth: usize, _reason: DropReason) {}

    fn crawl_interrupted(&self, _in_flight: usize) {}
}

// Sends every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn crawl_started(&self, seed: &str) {
        tracing::info!(seed, "starting crawl");
    }

    fn page_started(&self, task: &CrawlTask) {
        tracing::info!(url = %task.url, depth = task.depth, "crawling");
    }

    fn page_succeeded(&self, task: &CrawlTask, matches: usize, links: usize) {
        tracing::debug!(url = %task.url, matches, links, "page done");
    }

    fn page_failed(&self, task: &CrawlTask, error: &FetchError) {
        tracing::warn!(url = %task.url, kind = error.kind(), %error, "failed to fetch page");
    }

    fn link_dropped(&self, url: &str, depth: usize, reason: DropReason) {
        tracing::debug!(url, depth, ?reason, "link not queued");
    }

    fn crawl_interrupted(&self, in_flight: usize) {
        tracing::warn!(in_flight, "interrupted, no new pages will be fetched");
    }
}

// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl CrawlObserver for NullObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::default_directives;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn log_with(directives: &str, emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(move || writer.clone())
                    .with_ansi(false),
            );
        tracing::subscriber::with_default(subscriber, emit);

        let bytes = captured.0.lock().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn drop_one() {
        TracingObserver.link_dropped("https://example.com/deep", 3, DropReason::TooDeep);
    }

    #[test]
    fn test_link_decisions_show_up_with_verbose() {
        let output = log_with(default_directives(true, false), drop_one);
        assert!(output.contains("link not queued"));
        assert!(output.contains("TooDeep"));
    }

    #[test]
    fn test_link_decisions_hidden_by_default() {
        let output = log_with(default_directives(false, false), drop_one);
        assert!(output.is_empty());
    }

    #[test]
    fn test_page_failures_are_warnings() {
        let task = CrawlTask {
            url: "https://example.com/missing".to_string(),
            depth: 1,
        };
        let output = log_with(default_directives(false, false), || {
            TracingObserver.page_failed(&task, &FetchError::HttpStatus(404));
        });
        assert!(output.contains("WARN"));
        assert!(output.contains("http_status"));
    }
}
