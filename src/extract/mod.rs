//! Extraction pass over a finished mirror
//!
//! A stateless batch transform, separate from the crawl: it reads the `.html`
//! files the crawler produced, extracts one product record per complete page,
//! writes them all to a JSON file, and gathers image/PDF assets into one
//! directory. It never touches the network.

mod assets;
mod page;
mod record;

pub use assets::{collect_assets, ASSET_EXTENSIONS};
pub use page::extract_product;
pub use record::{ArcCoordinates, CanvasSize, ProductRecord};

use crate::config::Config;
use crate::Result;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Outcome of an extraction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Product records written to the data file
    pub records: usize,
    /// Pages lacking a required field, skipped
    pub skipped: usize,
    /// Asset files copied into the asset directory
    pub assets_copied: usize,
}

/// Runs the full extraction pass described by the configuration
///
/// Walks the pages root for `.html` files, extracts product records, writes
/// them as pretty JSON to the configured data path, and collects assets into
/// the configured asset directory.
pub fn run_extract(config: &Config) -> Result<ExtractSummary> {
    let pages_root = Path::new(&config.output.pages_root);
    let data_path = Path::new(&config.output.data_path);
    let assets_root = Path::new(&config.output.assets_root);

    let mut files = html_files(pages_root)?;
    // Deterministic record order regardless of directory iteration order
    files.sort();

    let mut records = Vec::new();
    let mut skipped = 0;
    for file in &files {
        let html = std::fs::read_to_string(file)?;
        match extract_product(&html) {
            Some(record) => records.push(record),
            None => {
                tracing::debug!("no product record in {}", file.display());
                skipped += 1;
            }
        }
    }

    if let Some(parent) = data_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(std::fs::File::create(data_path)?);
    serde_json::to_writer_pretty(writer, &records)?;

    let assets_copied = collect_assets(pages_root, assets_root)?;

    let summary = ExtractSummary {
        records: records.len(),
        skipped,
        assets_copied,
    };
    tracing::info!(
        "extraction complete: {} records written to {}, {} pages skipped, {} assets collected",
        summary.records,
        data_path.display(),
        summary.skipped,
        summary.assets_copied
    );

    Ok(summary)
}

/// Recursively lists every `.html` file under `root`
fn html_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("html"))
                .unwrap_or(false)
            {
                files.push(path);
            }
        }
    }

    Ok(files)
}
