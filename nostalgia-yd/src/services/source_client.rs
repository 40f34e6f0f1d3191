//! HTTP source client
//!
//! Fetches raw payloads (HTML pages, JSON documents) from third-party sources.
//! Every call is bounded by a timeout; a timeout is just another
//! `SourceFetchError`.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Connection establishment limit, independent of per-request timeouts
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source fetch failure
///
/// Never surfaced to API callers; extractors absorb it into their fallback.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Source returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Raw payload fetcher
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// GET `url` and return the body as text
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, SourceFetchError>;
}

/// Fetch with a hard deadline regardless of the client implementation
pub async fn fetch_bounded(
    client: &dyn SourceClient,
    url: &str,
    timeout: Duration,
) -> Result<String, SourceFetchError> {
    match tokio::time::timeout(timeout, client.fetch(url, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(SourceFetchError::Timeout {
            url: url.to_string(),
            timeout,
        }),
    }
}

/// reqwest-backed source client
#[derive(Debug, Clone)]
pub struct HttpSourceClient {
    http_client: Client,
}

impl HttpSourceClient {
    pub fn new(user_agent: &str) -> Result<Self, SourceFetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("text/html,application/json;q=0.9,*/*;q=0.8"),
        );

        let http_client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SourceFetchError::Network {
                url: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl SourceClient for HttpSourceClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, SourceFetchError> {
        debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "Fetching source");

        let response = self
            .http_client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceFetchError::Timeout {
                        url: url.to_string(),
                        timeout,
                    }
                } else {
                    SourceFetchError::Network {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SourceFetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
