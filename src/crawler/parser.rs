//! HTML parser for extracting crawl targets
//!
//! A fetched page is parsed for exactly two kinds of targets:
//! - `<a href>` anchors, candidates for further page crawling
//! - `<img src>` images, candidates for resource download
//!
//! Every target is resolved to an absolute URL against the page it was
//! discovered on and normalized (fragment dropped) before being compared or
//! scheduled.

use scraper::{Html, Selector};
use url::Url;

/// Crawl targets extracted from one HTML page
#[derive(Debug, Clone, Default)]
pub struct PageTargets {
    /// Absolute anchor targets, in document order
    pub links: Vec<Url>,

    /// Absolute image sources, in document order
    pub images: Vec<Url>,
}

/// Parses HTML content and extracts anchor and image targets
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - URL of the page itself, used to resolve relative targets
///
/// # Example
///
/// ```
/// use sitefold::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><body><a href="widget/">Widget</a></body></html>"#;
/// let page_url = Url::parse("https://host.example/shop/").unwrap();
/// let targets = parse_page(html, &page_url);
/// assert_eq!(targets.links[0].as_str(), "https://host.example/shop/widget/");
/// ```
pub fn parse_page(html: &str, page_url: &Url) -> PageTargets {
    let document = Html::parse_document(html);
    let mut targets = PageTargets::default();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_target(href, page_url) {
                    targets.links.push(url);
                }
            }
        }
    }

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for element in document.select(&img_selector) {
            if let Some(src) = element.value().attr("src") {
                if let Some(url) = resolve_target(src, page_url) {
                    targets.images.push(url);
                }
            }
        }
    }

    targets
}

/// Resolves a discovered href/src to a normalized absolute URL
///
/// Returns None for targets that can never be crawled:
/// - empty or fragment-only references
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that fails to resolve or resolves outside http(s)
fn resolve_target(reference: &str, page_url: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    if reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    let mut url = page_url.join(reference).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // Fragments never affect what is fetched
    url.set_fragment(None);

    Some(url)
}
