//! Shared crawl counters
//!
//! Workers bump these atomics as they go; the coordinator reads a snapshot
//! for progress lines and the final summary.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared by all crawl workers
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_saved: AtomicUsize,
    skips: AtomicUsize,
    resources_saved: AtomicUsize,
    resource_bytes: AtomicU64,
    failures: AtomicUsize,
}

/// Point-in-time copy of the crawl counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSnapshot {
    pub pages_saved: usize,
    pub skips: usize,
    pub resources_saved: usize,
    pub resource_bytes: u64,
    pub failures: usize,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_saved(&self) {
        self.pages_saved.fetch_add(1, Ordering::Relaxed);
    }

    /// Non-200 status or non-HTML content type; the item was abandoned
    pub fn record_skip(&self) {
        self.skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resource_saved(&self, bytes: u64) {
        self.resources_saved.fetch_add(1, Ordering::Relaxed);
        self.resource_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Transport or filesystem failure; the item was abandoned
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlSnapshot {
        CrawlSnapshot {
            pages_saved: self.pages_saved.load(Ordering::Relaxed),
            skips: self.skips.load(Ordering::Relaxed),
            resources_saved: self.resources_saved.load(Ordering::Relaxed),
            resource_bytes: self.resource_bytes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
