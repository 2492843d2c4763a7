//! On-disk site store
//!
//! Writes fetched pages and resources under the output root at the path the
//! mapper derives from their URL, creating parent directories lazily.
//! Write failures are fatal only for the item being written; the caller logs
//! and moves on.

use crate::url::{map_to_path, CrawlScope};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use url::Url;

/// File store mirroring the crawled site
pub struct SiteStore {
    root: PathBuf,
    scope: Arc<CrawlScope>,
}

impl SiteStore {
    /// Creates a store writing under `root`; the directory itself is created
    /// on the first write
    pub fn new(root: impl Into<PathBuf>, scope: Arc<CrawlScope>) -> Self {
        Self {
            root: root.into(),
            scope,
        }
    }

    /// The output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a fetched HTML page
    ///
    /// # Arguments
    ///
    /// * `url` - The page's URL; determines the file path via the mapper
    /// * `body` - Decoded page text
    ///
    /// # Returns
    ///
    /// The path the page was written to, relative to the store root.
    pub async fn save_page(&self, url: &Url, body: &str) -> Result<PathBuf> {
        let relative = PathBuf::from(map_to_path(url, &self.scope));
        let full = self.root.join(&relative);

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, body).await?;

        tracing::info!("saved page {} -> {}", url, relative.display());
        Ok(relative)
    }

    /// Streams a resource response to disk in binary chunks
    ///
    /// Chunks are written in arrival order with no reordering, so memory use
    /// is bounded by the transport's chunk size regardless of resource size.
    ///
    /// # Arguments
    ///
    /// * `url` - The resource's URL; determines the file path via the mapper
    /// * `response` - An open status-200 response for the resource
    ///
    /// # Returns
    ///
    /// The relative path written and the number of bytes streamed.
    pub async fn save_resource(
        &self,
        url: &Url,
        response: &mut reqwest::Response,
    ) -> Result<(PathBuf, u64)> {
        let relative = PathBuf::from(map_to_path(url, &self.scope));
        let full = self.root.join(&relative);

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(&full).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(
            "saved resource {} -> {} ({} bytes)",
            url,
            relative.display(),
            written
        );
        Ok((relative, written))
    }
}
