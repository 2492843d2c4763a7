//! Crawler module for mirroring a site to disk
//!
//! This module contains the core crawling logic:
//! - HTTP fetching for pages and streamed resources
//! - HTML parsing for anchor and image targets
//! - The frontier queue with atomic dedup
//! - The fixed-size worker pool and its drain-based shutdown

mod fetcher;
mod frontier;
mod parser;
mod pool;
mod stats;

pub use fetcher::{build_http_client, fetch_page, open_resource, PageFetch};
pub use frontier::{Frontier, ResourceLedger};
pub use parser::{parse_page, PageTargets};
pub use pool::{run_worker, CrawlContext};
pub use stats::{CrawlSnapshot, CrawlStats};

use crate::config::Config;
use crate::store::SiteStore;
use crate::url::CrawlScope;
use crate::{Result, SitefoldError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// Configured crawl, ready to run
///
/// Construction derives the crawl scope from the seed URL and builds the
/// shared context; [`run`](Crawler::run) seeds the frontier and drives the
/// worker pool until the frontier drains.
pub struct Crawler {
    seed: Url,
    workers: usize,
    ctx: Arc<CrawlContext>,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(SitefoldError)` - Bad seed URL or HTTP client failure
    pub fn new(config: &Config) -> Result<Self> {
        let seed = Url::parse(&config.crawler.seed_url)?;
        let scope = Arc::new(CrawlScope::from_seed(
            &seed,
            config.crawler.enforce_base_path,
        )?);

        let client = build_http_client(&config.user_agent, config.crawler.request_timeout_secs)
            .map_err(SitefoldError::Reqwest)?;

        let workers = config.crawler.workers as usize;

        let ctx = Arc::new(CrawlContext {
            client,
            scope: Arc::clone(&scope),
            frontier: Arc::new(Frontier::new(workers)),
            resources: Arc::new(ResourceLedger::new()),
            store: Arc::new(SiteStore::new(&config.output.pages_root, scope)),
            stats: Arc::new(CrawlStats::new()),
            politeness_delay: Duration::from_millis(config.crawler.politeness_delay_ms),
        });

        Ok(Self { seed, workers, ctx })
    }

    /// Runs the crawl to completion
    ///
    /// Seeds the frontier with the start URL, spawns the worker pool, and
    /// waits for the natural drain of the frontier; there is no mid-flight
    /// cancellation path.
    ///
    /// # Returns
    ///
    /// The final crawl counters.
    pub async fn run(self) -> Result<CrawlSnapshot> {
        let started = std::time::Instant::now();
        tracing::info!(
            "starting crawl of {} with {} workers",
            self.seed,
            self.workers
        );

        self.ctx.frontier.try_enqueue(&self.seed);

        let mut pool = JoinSet::new();
        for worker_id in 0..self.workers {
            let ctx = Arc::clone(&self.ctx);
            pool.spawn(run_worker(worker_id, ctx));
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                tracing::error!("crawl worker panicked: {}", e);
            }
        }

        let snapshot = self.ctx.stats.snapshot();
        tracing::info!(
            "crawl complete in {:?}: {} pages, {} resources ({} bytes), {} skipped, {} failures, {} URLs seen",
            started.elapsed(),
            snapshot.pages_saved,
            snapshot.resources_saved,
            snapshot.resource_bytes,
            snapshot.skips,
            snapshot.failures,
            self.ctx.frontier.seen_count(),
        );

        Ok(snapshot)
    }
}

/// Runs a complete crawl operation
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSnapshot)` - Crawl completed; final counters
/// * `Err(SitefoldError)` - Setup failed before any worker started
pub async fn crawl(config: &Config) -> Result<CrawlSnapshot> {
    Crawler::new(config)?.run().await
}
