// src/crawl/frontier.rs
// =============================================================================
// The frontier: pages waiting to be fetched, plus the pages already taken.
//
// How it works:
// 1. enqueue(url, depth) normalizes the URL and silently drops it if it was
//    already taken, is already waiting, is too deep, or the page budget is
//    spent
// 2. dequeue() pops the oldest task (FIFO = breadth-first) and marks its URL
//    visited in the same critical section, so two workers can never receive
//    the same URL
//
// All state sits behind one mutex; every operation is a short, synchronous
// critical section and nothing is awaited while holding the lock.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;
use url::Url;

// One page to fetch. Created by the frontier, consumed once by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: usize,
}

// Why a discovered link was not queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Unparseable,
    AlreadyVisited,
    AlreadyQueued,
    TooDeep,
    BudgetExhausted,
    // the two below are decided by the scheduler, not the frontier
    OffHost,
    Disallowed,
}

#[derive(Debug, Default)]
struct State {
    queue: VecDeque<CrawlTask>,
    // normalized URLs currently in `queue`
    pending: HashSet<String>,
    // normalized URLs ever handed out by dequeue(); never shrinks
    visited: HashSet<String>,
    // tasks ever accepted, the seed included
    enqueued: usize,
}

#[derive(Debug)]
pub struct Frontier {
    max_depth: usize,
    max_pages: usize,
    state: Mutex<State>,
}

impl Frontier {
    pub fn new(max_depth: usize, max_pages: usize) -> Self {
        Self {
            max_depth,
            max_pages,
            state: Mutex::new(State::default()),
        }
    }

    // Adds a task if it passes every limit.
    //
    // Returns the drop reason for logging; a dropped URL is never an error.
    pub fn enqueue(&self, url: &str, depth: usize) -> Result<(), DropReason> {
        let normalized = normalize_url(url).ok_or(DropReason::Unparseable)?;

        if depth > self.max_depth {
            return Err(DropReason::TooDeep);
        }

        let mut state = self.state.lock();
        if state.visited.contains(&normalized) {
            return Err(DropReason::AlreadyVisited);
        }
        if state.pending.contains(&normalized) {
            // first-seen depth wins
            return Err(DropReason::AlreadyQueued);
        }
        if state.enqueued >= self.max_pages {
            return Err(DropReason::BudgetExhausted);
        }

        state.enqueued += 1;
        state.pending.insert(normalized.clone());
        state.queue.push_back(CrawlTask {
            url: normalized,
            depth,
        });
        Ok(())
    }

    // Takes the next task and marks it visited.
    pub fn dequeue(&self) -> Option<CrawlTask> {
        let mut state = self.state.lock();
        while let Some(task) = state.queue.pop_front() {
            state.pending.remove(&task.url);
            // insert() is false if the URL was visited before
            if state.visited.insert(task.url.clone()) {
                return Some(task);
            }
        }
        None
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    #[cfg(test)]
    pub fn visited_count(&self) -> usize {
        self.state.lock().visited.len()
    }

    #[cfg(test)]
    pub fn is_visited(&self, url: &str) -> bool {
        normalize_url(url).is_some_and(|normalized| self.state.lock().visited.contains(&normalized))
    }
}

// Canonical form used for every membership check.
//
// - scheme and host are lowercased (the url crate does this while parsing)
// - default ports are dropped (also the url crate)
// - the fragment is removed
// - a trailing slash is removed from non-root paths
// - the query string is kept: ?page=2 and ?page=3 are different pages
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return None;
    }
    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(if trimmed.is_empty() { "/" } else { &trimmed });
    }

    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why mark visited at dequeue time and not at enqueue time?
//    - The pending set already stops the same URL from being queued twice
//    - "visited" then means "a worker has taken it", which is exactly the
//      set of URLs that must never be fetched again
//
// 2. Why count enqueues instead of fetches against max_pages?
//    - Every accepted task is fetched exactly once, so the count of accepted
//      tasks bounds fetch attempts, and the queue can never hold more work
//      than the budget allows
//
// 3. Why parking_lot::Mutex?
//    - No lock poisoning, so lock() returns the guard directly
//    - The critical sections are tiny; no async mutex is needed because we
//      never hold the lock across an .await
// -----------------------------------------------------------------------------
