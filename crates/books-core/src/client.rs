//! HTTP client for fetching catalog pages
//!
//! This module provides a polite HTTP client: every request is preceded by a
//! fixed delay so a scrape never hammers the source server. Requests are not
//! retried; a failed page is reported to the caller as an error.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};

/// Default User-Agent mimicking a desktop browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default Accept header for HTML content
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Configuration for the catalog HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Delay observed before every request, in milliseconds (default: 1500)
    pub polite_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            polite_delay_ms: 1500,
        }
    }
}

impl ClientConfig {
    /// The polite delay as a `Duration`
    pub fn polite_delay(&self) -> Duration {
        Duration::from_millis(self.polite_delay_ms)
    }
}

/// HTTP client for catalog pages
///
/// One `reqwest::Client` is built per instance from the given configuration;
/// there is no shared global client state.
pub struct BooksClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Delay before each request
    polite_delay: Duration,
}

impl BooksClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(DEFAULT_ACCEPT),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            polite_delay: config.polite_delay(),
        })
    }

    /// Fetch the HTML body of an absolute URL.
    ///
    /// Waits for the polite delay, then issues a single GET request.
    ///
    /// # Errors
    /// - `ScrapeError::HttpError` - transport failure or timeout
    /// - `ScrapeError::HttpStatus` - the server answered with a non-2xx status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        if !self.polite_delay.is_zero() {
            sleep(self.polite_delay).await;
        }

        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "page fetch failed");
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Get the delay observed before each request
    pub fn polite_delay(&self) -> Duration {
        self.polite_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_client() -> BooksClient {
        BooksClient::with_config(ClientConfig {
            polite_delay_ms: 0,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.polite_delay_ms, 1500);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.polite_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_client_creation() {
        let client = BooksClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().polite_delay(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let body = fast_client()
            .fetch(&format!("{}/index.html", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::header("user-agent", "books-test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("agent ok"))
            .mount(&server)
            .await;

        let client = BooksClient::with_config(ClientConfig {
            user_agent: "books-test-agent".to_string(),
            timeout_secs: 5,
            polite_delay_ms: 0,
        })
        .unwrap();

        let body = client.fetch(&server.uri()).await.unwrap();
        assert_eq!(body, "agent ok");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/catalogue/page-2.html", server.uri());
        match fast_client().fetch(&url).await {
            Err(ScrapeError::HttpStatus { url: failed, status }) => {
                assert_eq!(failed, url);
                assert_eq!(status, 503);
            }
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        // Nothing listens on port 9 (discard) in the test environment
        let result = fast_client().fetch("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(ScrapeError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_fetch_observes_polite_delay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = BooksClient::with_config(ClientConfig {
            polite_delay_ms: 100,
            ..ClientConfig::default()
        })
        .unwrap();

        let start = Instant::now();
        client.fetch(&server.uri()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
