//! Crawl worker pool
//!
//! A fixed number of workers share one frontier. Each worker loops:
//! pull a URL, fetch it, parse it for anchors and images, persist the page,
//! feed in-scope discoveries back into the frontier, download newly marked
//! images, mark the item complete, then sleep the politeness delay. Pulling a
//! shutdown sentinel stops the worker.
//!
//! Nothing a single URL does can kill a worker: transport failures, non-200
//! statuses, non-HTML bodies and filesystem errors are logged and the worker
//! moves on.

use crate::crawler::fetcher::{fetch_page, open_resource, PageFetch};
use crate::crawler::frontier::{Frontier, ResourceLedger};
use crate::crawler::parser::parse_page;
use crate::crawler::stats::CrawlStats;
use crate::store::SiteStore;
use crate::url::CrawlScope;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Everything a crawl worker shares with its siblings
pub struct CrawlContext {
    pub client: Client,
    pub scope: Arc<CrawlScope>,
    pub frontier: Arc<Frontier>,
    pub resources: Arc<ResourceLedger>,
    pub store: Arc<SiteStore>,
    pub stats: Arc<CrawlStats>,
    pub politeness_delay: Duration,
}

/// Runs one crawl worker until the frontier hands it a shutdown sentinel
pub async fn run_worker(worker_id: usize, ctx: Arc<CrawlContext>) {
    tracing::debug!("worker {} started", worker_id);

    while let Some(url) = ctx.frontier.next().await {
        process_page(&ctx, &url).await;

        // The item is complete only after its discoveries were fed back
        ctx.frontier.complete();

        tokio::time::sleep(ctx.politeness_delay).await;
    }

    tracing::debug!("worker {} stopped", worker_id);
}

/// Fetches, persists and expands a single page URL
async fn process_page(ctx: &CrawlContext, url: &Url) {
    let body = match fetch_page(&ctx.client, url).await {
        PageFetch::Html { body } => body,
        PageFetch::NotHtml { content_type } => {
            // Non-HTML page fetches are discarded without parsing
            tracing::debug!("skipping {}: content type {}", url, content_type);
            ctx.stats.record_skip();
            return;
        }
        PageFetch::HttpStatus { status } => {
            tracing::warn!("skipping {}: status {}", url, status);
            ctx.stats.record_skip();
            return;
        }
        PageFetch::TransportError { error } => {
            tracing::warn!("failed to fetch {}: {}", url, error);
            ctx.stats.record_failure();
            return;
        }
    };

    let targets = parse_page(&body, url);

    // A write failure loses this page but not its discoveries
    match ctx.store.save_page(url, &body).await {
        Ok(_) => ctx.stats.record_page_saved(),
        Err(e) => {
            tracing::error!("failed to save {}: {}", url, e);
            ctx.stats.record_failure();
        }
    }

    for link in &targets.links {
        if ctx.scope.contains(link) && ctx.frontier.try_enqueue(link) {
            tracing::debug!("scheduled {}", link);
        }
    }

    for image in &targets.images {
        if ctx.scope.contains(image) && ctx.resources.try_mark(image) {
            download_resource(ctx, image).await;
        }
    }
}

/// Downloads one newly marked resource within the current worker
async fn download_resource(ctx: &CrawlContext, url: &Url) {
    let mut response = match open_resource(&ctx.client, url).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            ctx.stats.record_skip();
            return;
        }
        Err(e) => {
            tracing::warn!("failed to fetch resource {}: {}", url, e);
            ctx.stats.record_failure();
            return;
        }
    };

    match ctx.store.save_resource(url, &mut response).await {
        Ok((_, bytes)) => ctx.stats.record_resource_saved(bytes),
        Err(e) => {
            tracing::error!("failed to save resource {}: {}", url, e);
            ctx.stats.record_failure();
        }
    }
}
