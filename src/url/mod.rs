//! URL handling module for Sitefold
//!
//! This module decides which URLs belong to the crawl (scope classification)
//! and how an in-scope URL maps onto the output directory (path mapping).

mod mapper;
mod scope;

pub use mapper::map_to_path;
pub use scope::{network_location, CrawlScope};
