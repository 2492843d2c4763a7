use serde::Deserialize;

/// Main configuration structure for Sitefold
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from; also fixes the crawl scope
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Number of concurrent crawl workers
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Fixed pause after each fetched item (milliseconds)
    #[serde(rename = "politeness-delay-ms", default = "default_politeness_delay")]
    pub politeness_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// When true, only URLs under the seed's base path are crawled.
    /// The default matches the seed's whole host, not just its sub-path.
    #[serde(rename = "enforce-base-path", default)]
    pub enforce_base_path: bool,
}

fn default_workers() -> u32 {
    4
}

fn default_politeness_delay() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

fn default_crawler_name() -> String {
    "Sitefold".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the mirrored pages and resources are written under
    #[serde(rename = "pages-root")]
    pub pages_root: String,

    /// Path of the JSON file the extraction pass writes
    #[serde(rename = "data-path", default = "default_data_path")]
    pub data_path: String,

    /// Directory collected image/PDF assets are copied into
    #[serde(rename = "assets-root", default = "default_assets_root")]
    pub assets_root: String,
}

fn default_data_path() -> String {
    "./data.json".to_string()
}

fn default_assets_root() -> String {
    "./assets".to_string()
}
