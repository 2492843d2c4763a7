use crate::{UrlError, UrlResult};
use url::Url;

/// The crawl scope, fixed at startup from the seed URL
///
/// A crawl is restricted to a single network location. The seed's own path
/// segments form the base path that [`map_to_path`](crate::url::map_to_path)
/// strips from output paths.
///
/// With `enforce_base_path` off (the default) any page on the seed's host is
/// in scope, even outside the seed's sub-path. Turning it on restricts the
/// crawl to URLs whose path begins with the base path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    network_location: String,
    base_path_segments: Vec<String>,
    enforce_base_path: bool,
}

impl CrawlScope {
    /// Derives the crawl scope from a seed URL
    ///
    /// # Arguments
    ///
    /// * `seed` - The absolute start URL of the crawl
    /// * `enforce_base_path` - Whether scope checks also require the seed's
    ///   path prefix
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlScope)` - Scope for the seed's network location
    /// * `Err(UrlError)` - The seed has an unusable scheme or no host
    ///
    /// # Examples
    ///
    /// ```
    /// use sitefold::CrawlScope;
    /// use url::Url;
    ///
    /// let seed = Url::parse("https://host.example/turing-lab/ti-lab-shop/").unwrap();
    /// let scope = CrawlScope::from_seed(&seed, false).unwrap();
    /// assert_eq!(scope.network_location(), "host.example");
    /// assert_eq!(scope.base_path_segments(), ["turing-lab", "ti-lab-shop"]);
    /// ```
    pub fn from_seed(seed: &Url, enforce_base_path: bool) -> UrlResult<Self> {
        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(seed.scheme().to_string()));
        }

        let network_location = network_location(seed).ok_or(UrlError::MissingHost)?;

        let base_path_segments = seed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            network_location,
            base_path_segments,
            enforce_base_path,
        })
    }

    /// Returns whether a candidate URL is in scope for this crawl
    ///
    /// A candidate is in scope iff its scheme is http or https and its
    /// network location equals the scope's. When `enforce_base_path` is set,
    /// the candidate's path must additionally begin with the base path
    /// segments.
    pub fn contains(&self, candidate: &Url) -> bool {
        if candidate.scheme() != "http" && candidate.scheme() != "https" {
            return false;
        }

        match network_location(candidate) {
            Some(loc) if loc == self.network_location => {}
            _ => return false,
        }

        if self.enforce_base_path {
            let mut segments = candidate.path().split('/').filter(|s| !s.is_empty());
            for base in &self.base_path_segments {
                if segments.next() != Some(base.as_str()) {
                    return false;
                }
            }
        }

        true
    }

    /// The host (and explicit port, if any) this crawl is restricted to
    pub fn network_location(&self) -> &str {
        &self.network_location
    }

    /// The seed's path segments, stripped from mapped output paths
    pub fn base_path_segments(&self) -> &[String] {
        &self.base_path_segments
    }
}

/// Extracts the network location (lowercase host plus explicit port) of a URL
///
/// # Examples
///
/// ```
/// use sitefold::url::network_location;
/// use url::Url;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://example.com:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("example.com:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
