//! Frontier queue and dedup sets
//!
//! The frontier owns all shared mutable crawl state: the queue of pending
//! URLs, the set of URLs ever scheduled, and the in-flight work counter used
//! to detect drain. Workers interact with it only through atomic operations;
//! the raw sets are never exposed.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

/// The crawl frontier: pending queue plus visited set
///
/// `try_enqueue` checks and inserts in a single critical section, which is
/// what bounds the crawl: a URL enters the visited set at most once,
/// atomically with its enqueue, so concurrent discovery of the same link
/// schedules exactly one fetch.
///
/// Drain detection uses a work counter covering both queued and in-flight
/// items. When it reaches zero no worker can ever produce new work, so the
/// frontier pushes one shutdown sentinel per worker and wakes everyone.
pub struct Frontier {
    state: Mutex<FrontierState>,
    wakeup: Notify,
    workers: usize,
}

struct FrontierState {
    /// Pending items; `None` is the per-worker shutdown sentinel
    queue: VecDeque<Option<Url>>,
    /// Normalized URLs already enqueued or fetched
    seen: HashSet<String>,
    /// Items enqueued but not yet completed (queued + in-flight)
    pending: usize,
}

impl Frontier {
    /// Creates an empty frontier serving `workers` consumers
    pub fn new(workers: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                seen: HashSet::new(),
                pending: 0,
            }),
            wakeup: Notify::new(),
            workers,
        }
    }

    /// Atomically schedules a URL if it has never been seen
    ///
    /// Returns true iff the URL was newly scheduled. Every accepted item must
    /// later be balanced by exactly one [`complete`](Self::complete) call.
    pub fn try_enqueue(&self, url: &Url) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            if !state.seen.insert(url.as_str().to_string()) {
                return false;
            }
            state.queue.push_back(Some(url.clone()));
            state.pending += 1;
        }
        self.wakeup.notify_one();
        true
    }

    /// Pulls the next URL, blocking while the frontier is empty but not drained
    ///
    /// Returns `None` when a shutdown sentinel is pulled; the calling worker
    /// must stop.
    pub async fn next(&self) -> Option<Url> {
        loop {
            // Register for wakeup before checking the queue so an enqueue
            // between the check and the await is not lost
            let notified = self.wakeup.notified();

            {
                let mut state = self.state.lock().unwrap();
                if let Some(item) = state.queue.pop_front() {
                    return item;
                }
            }

            notified.await;
        }
    }

    /// Marks one pulled item as fully processed
    ///
    /// Must be called after the item's discoveries have been fed back via
    /// `try_enqueue`. When the last pending item completes, the frontier is
    /// drained and shutdown sentinels are pushed for every worker.
    pub fn complete(&self) {
        let drained = {
            let mut state = self.state.lock().unwrap();
            debug_assert!(state.pending > 0, "complete() without matching enqueue");
            state.pending -= 1;
            if state.pending == 0 {
                for _ in 0..self.workers {
                    state.queue.push_back(None);
                }
                true
            } else {
                false
            }
        };

        if drained {
            tracing::debug!("frontier drained, signaling {} workers", self.workers);
            self.wakeup.notify_waiters();
            // A permit for consumers that are not parked yet
            self.wakeup.notify_one();
        }
    }

    /// Number of URLs ever scheduled
    pub fn seen_count(&self) -> usize {
        self.state.lock().unwrap().seen.len()
    }

    /// Number of items enqueued but not yet completed
    pub fn pending_count(&self) -> usize {
        self.state.lock().unwrap().pending
    }
}

/// Dedup set for image/binary resources
///
/// Resources are deduplicated independently of pages: a URL reachable both as
/// an anchor target and as an image source is downloaded once as a resource
/// and still eligible once as a page. The ledger has its own lock and no
/// ordering relationship with the frontier's.
pub struct ResourceLedger {
    seen: Mutex<HashSet<String>>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Atomically marks a resource URL; returns true iff it was newly marked
    pub fn try_mark(&self, url: &Url) -> bool {
        self.seen.lock().unwrap().insert(url.as_str().to_string())
    }

    /// Number of resources ever marked
    pub fn marked_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new()
    }
}
