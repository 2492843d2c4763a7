use crate::url::CrawlScope;
use url::Url;

/// Maps an in-scope URL to a relative output file path
///
/// # Mapping Rules
///
/// 1. Split the URL's path on `/` and drop empty segments
/// 2. If the segments begin with exactly the scope's base path segments,
///    drop that prefix, so output mirrors only what's below the seed
/// 3. If the original path ended with a trailing slash, append `index.html`
/// 4. If no segments remain, the path is `index.html`
/// 5. Join the remaining segments with `/`
///
/// The mapping is pure and deterministic: it depends only on the URL and the
/// scope, never on fetch order. Two URLs differing only by a trailing slash
/// versus an explicit `index.html` segment map to the same path; the last
/// writer wins and no collision is reported.
///
/// # Examples
///
/// ```
/// use sitefold::{map_to_path, CrawlScope};
/// use url::Url;
///
/// let seed = Url::parse("https://host.example/turing-lab/ti-lab-shop/").unwrap();
/// let scope = CrawlScope::from_seed(&seed, false).unwrap();
///
/// let url = Url::parse("https://host.example/turing-lab/ti-lab-shop/products/widget/").unwrap();
/// assert_eq!(map_to_path(&url, &scope), "products/widget/index.html");
/// ```
pub fn map_to_path(url: &Url, scope: &CrawlScope) -> String {
    let path = url.path();
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let base = scope.base_path_segments();
    if segments.len() >= base.len() && segments.iter().zip(base).all(|(s, b)| *s == b.as_str()) {
        segments.drain(..base.len());
    }

    if path.ends_with('/') {
        segments.push("index.html");
    }

    if segments.is_empty() {
        return "index.html".to_string();
    }

    segments.join("/")
}
