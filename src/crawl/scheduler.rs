// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. The seed goes into the frontier at depth 0
// 2. Up to `concurrency` tasks are taken from the frontier and started
// 3. Whenever one finishes, its matches are merged and its links are set
//    aside, and the loop tops the pool back up from the frontier
// 4. When the frontier is empty and nothing is in flight, the level is done:
//    the links set aside are queued in the order their pages were taken,
//    which fills the frontier with the next level
// 5. The crawl ends when a level finishes without queueing anything
//
// The frontier never holds more than one level, so a page is never started
// while a shallower page is still in flight. Depth is always the shortest
// hop count from the seed, and which links make it under the page budget
// does not depend on how fast each server answers.
//
// Each task goes pending (in the frontier) -> in flight (in the pool) ->
// succeeded or failed. A failed page is reported and forgotten; it never
// stops the crawl.
//
// Concurrency comes from polling many fetch futures at once
// (FuturesUnordered) on one task: the network waits overlap, everything
// else runs between polls.
// =============================================================================

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::frontier::{CrawlTask, DropReason, Frontier};
use super::observer::{CrawlObserver, TracingObserver};
use crate::config::{ConfigError, CrawlConfig};
use crate::extract::ExtractorRegistry;
use crate::fetch::{Fetcher, RobotsRules};
use crate::report::{Aggregator, Report};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub links_queued: usize,
    pub links_dropped: usize,
    pub interrupted: bool,
}

impl CrawlStats {
    // Counts a finished task and hands back the links of a successful page
    fn record(&mut self, outcome: TaskOutcome) -> Option<Discovered> {
        match outcome {
            TaskOutcome::Succeeded(found) => {
                self.pages_fetched += 1;
                Some(found)
            }
            TaskOutcome::Failed => {
                self.pages_failed += 1;
                None
            }
        }
    }
}

#[derive(Debug)]
pub struct CrawlOutcome {
    pub report: Report,
    pub stats: CrawlStats,
}

// Links found on a finished page, waiting for the end of its level.
// `order` is the position at which the page was taken from the frontier.
struct Discovered {
    order: usize,
    task: CrawlTask,
    links: Vec<String>,
}

enum TaskOutcome {
    Succeeded(Discovered),
    Failed,
}

pub struct Crawler {
    config: CrawlConfig,
    seed: Url,
    fetcher: Fetcher,
    extractors: ExtractorRegistry,
    observer: Arc<dyn CrawlObserver>,
}

impl Crawler {
    // Validates the configuration and builds the HTTP client.
    //
    // This is the only place a crawl can fail as a whole.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let seed = config.validate()?;
        let fetcher = Fetcher::new(config.timeout, &config.user_agent)?;

        Ok(Self {
            config,
            seed,
            fetcher,
            extractors: ExtractorRegistry::default(),
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }

    // Runs the crawl to completion, or until `cancel` fires.
    //
    // On cancellation no new fetch starts; fetches already running get one
    // fetch timeout to finish and are dropped after that. Only pages that
    // finished contribute to the report.
    pub async fn crawl(&self, cancel: CancellationToken) -> CrawlOutcome {
        self.observer.crawl_started(self.seed.as_str());

        let robots = if self.config.respect_robots {
            RobotsRules::fetch(&self.fetcher, &self.seed).await
        } else {
            RobotsRules::allow_all()
        };

        let frontier = Frontier::new(self.config.max_depth, self.config.max_pages);
        let aggregator = Aggregator::new();
        let mut stats = CrawlStats::default();

        if robots.allows(&self.seed) {
            if let Err(reason) = frontier.enqueue(self.seed.as_str(), 0) {
                self.observer.link_dropped(self.seed.as_str(), 0, reason);
            }
        } else {
            self.observer
                .link_dropped(self.seed.as_str(), 0, DropReason::Disallowed);
        }

        let mut in_flight = FuturesUnordered::new();
        let mut discovered: Vec<Discovered> = Vec::new();
        let mut taken = 0;
        loop {
            if cancel.is_cancelled() {
                stats.interrupted = true;
                self.observer.crawl_interrupted(in_flight.len());

                // Each fetch already carries the same timeout, so the drain
                // normally ends on its own before this bound is reached
                let drain = async {
                    while let Some(outcome) = in_flight.next().await {
                        stats.record(outcome);
                    }
                };
                let _ = tokio::time::timeout(self.fetcher.timeout(), drain).await;
                break;
            }

            while in_flight.len() < self.config.concurrency {
                let Some(task) = frontier.dequeue() else {
                    break;
                };
                self.observer.page_started(&task);
                in_flight.push(self.run_task(taken, task, &aggregator));
                taken += 1;
            }

            if in_flight.is_empty() {
                if discovered.is_empty() {
                    break;
                }
                // level done; queue the next one in the order its parents were taken
                discovered.sort_unstable_by_key(|found| found.order);
                for found in discovered.drain(..) {
                    let (queued, dropped) =
                        self.queue_links(&found.task, &found.links, &frontier, &robots);
                    stats.links_queued += queued;
                    stats.links_dropped += dropped;
                }
                continue;
            }

            tokio::select! {
                _ = cancel.cancelled() => {}
                Some(outcome) = in_flight.next() => discovered.extend(stats.record(outcome)),
            }
        }
        drop(in_flight);

        CrawlOutcome {
            report: aggregator.finalize(),
            stats,
        }
    }

    // Fetch -> extract -> merge, for one task.
    //
    // Nothing is merged before the fetch has fully completed, so dropping
    // this future mid-fetch leaves the report untouched.
    async fn run_task(
        &self,
        order: usize,
        task: CrawlTask,
        aggregator: &Aggregator,
    ) -> TaskOutcome {
        let page = self.fetcher.fetch(&task.url).await;

        if let Some(error) = page.error() {
            self.observer.page_failed(&task, error);
            return TaskOutcome::Failed;
        }

        let mut found = 0;
        if let Some(content) = page.content.as_deref() {
            for (kind, matches) in self.extractors.run(content) {
                found += matches.len();
                aggregator.merge(kind, matches);
            }
        }
        self.observer.page_succeeded(&task, found, page.links.len());

        TaskOutcome::Succeeded(Discovered {
            order,
            task,
            links: page.links,
        })
    }

    fn queue_links(
        &self,
        task: &CrawlTask,
        links: &[String],
        frontier: &Frontier,
        robots: &RobotsRules,
    ) -> (usize, usize) {
        let depth = task.depth + 1;
        if depth > self.config.max_depth {
            return (0, 0);
        }

        let mut queued = 0;
        let mut dropped = 0;
        for link in links {
            let verdict = match Url::parse(link) {
                Err(_) => Err(DropReason::Unparseable),
                Ok(url) if self.config.same_host && !self.same_host(&url) => {
                    Err(DropReason::OffHost)
                }
                Ok(url) if !robots.allows(&url) => Err(DropReason::Disallowed),
                Ok(_) => frontier.enqueue(link, depth),
            };

            match verdict {
                Ok(()) => queued += 1,
                Err(reason) => {
                    dropped += 1;
                    self.observer.link_dropped(link, depth, reason);
                }
            }
        }

        (queued, dropped)
    }

    fn same_host(&self, url: &Url) -> bool {
        url.host_str() == self.seed.host_str()
            && url.port_or_known_default() == self.seed.port_or_known_default()
    }
}
