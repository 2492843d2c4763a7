//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for pages, decoded as text
//! - GET requests for resources, handed back as a stream for chunked writes
//! - Error classification
//!
//! Only status 200 counts as success; every other status is a skip, never a
//! retry.

use crate::config::UserAgentConfig;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a page fetch
#[derive(Debug)]
pub enum PageFetch {
    /// Status 200 with an HTML content type; body decoded as text
    Html {
        /// Decoded page body
        body: String,
    },

    /// Status 200 but not HTML; discarded without parsing
    NotHtml {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Any non-200 status
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// DNS/connection/timeout failure, or a body that failed to decode
    TransportError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for the whole crawl
///
/// A single request timeout applies to both page and resource fetches.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout_secs` - Per-request timeout in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL as a crawlable page
///
/// Pages require status 200 and a content type containing `text/html`;
/// everything else is reported back for the worker to log and skip.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> PageFetch {
    let response = match client.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            return PageFetch::TransportError {
                error: classify_transport_error(&e),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return PageFetch::HttpStatus {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return PageFetch::NotHtml { content_type };
    }

    match response.text().await {
        Ok(body) => PageFetch::Html { body },
        Err(e) => PageFetch::TransportError {
            error: e.to_string(),
        },
    }
}

/// Opens a resource URL for chunked download
///
/// Returns `Ok(Some(response))` on status 200; the caller streams the body
/// with [`Response::chunk`] so large binaries are never buffered whole.
/// Content type is not checked for resources.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The resource URL
///
/// # Returns
///
/// * `Ok(Some(Response))` - Resource is ready to stream
/// * `Ok(None)` - Non-200 status; skip the resource
/// * `Err(reqwest::Error)` - Transport failure
pub async fn open_resource(
    client: &Client,
    url: &Url,
) -> Result<Option<Response>, reqwest::Error> {
    let response = client.get(url.clone()).send().await?;

    if response.status() != StatusCode::OK {
        tracing::debug!(
            "skipping resource {}: status {}",
            url,
            response.status().as_u16()
        );
        return Ok(None);
    }

    Ok(Some(response))
}

/// Produces a short human-readable description of a transport failure
fn classify_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&UserAgentConfig::default(), 5).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let config = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
        };
        assert!(build_http_client(&config, 30).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        match fetch_page(&test_client(), &url).await {
            PageFetch::Html { body } => assert!(body.contains("hi")),
            other => panic!("expected Html, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/data", server.uri())).unwrap();
        match fetch_page(&test_client(), &url).await {
            PageFetch::NotHtml { content_type } => {
                assert!(content_type.contains("application/json"))
            }
            other => panic!("expected NotHtml, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_404_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        match fetch_page(&test_client(), &url).await {
            PageFetch::HttpStatus { status } => assert_eq!(status, 404),
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_resource_skips_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.png"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/gone.png", server.uri())).unwrap();
        let result = open_resource(&test_client(), &url).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_open_resource_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/img.png", server.uri())).unwrap();
        let mut response = open_resource(&test_client(), &url)
            .await
            .unwrap()
            .expect("resource should open");

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.unwrap() {
            bytes.extend_from_slice(&chunk);
        }
        assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }
}
