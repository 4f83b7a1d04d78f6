// src/ingest/fetch.rs
//! One-feed fetching against the RSS→JSON conversion endpoint, with
//! rate-limit detection and fallback. The policy wrapper at the bottom maps
//! every failure variant to the fallback dataset — nothing past this
//! boundary ever sees a fetch error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::fallback::fallback_raw_items;
use crate::ingest::types::{Clock, RawFeedItem};

pub const DEFAULT_ENDPOINT: &str = "https://api.rss2json.com/v1/api.json";

/// Fixed delays that spread requests against the upstream rate limiter.
/// Tests run with [`BackoffPolicy::ZERO`].
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Imposed before every conversion-endpoint request.
    pub pre_request: Duration,
    /// Imposed between feeds of the same category batch.
    pub inter_feed: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            pre_request: Duration::from_millis(1000),
            inter_feed: Duration::from_millis(500),
        }
    }
}

impl BackoffPolicy {
    pub const ZERO: BackoffPolicy = BackoffPolicy {
        pre_request: Duration::ZERO,
        inter_feed: Duration::ZERO,
    };
}

/// Why a single feed fetch failed. Every variant degrades to the fallback
/// collection in [`FeedFetcher::fetch_items`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream signalled HTTP 429; the whole endpoint is throttling us.
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed feed payload: {0}")]
    Malformed(String),
}

/// Transport seam for the conversion endpoint, so the pipeline is testable
/// without the network.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch one feed URL and return its raw items. An absent `items` array
    /// is zero results, not an error.
    async fn get_feed(&self, feed_url: &str) -> Result<Vec<RawFeedItem>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    items: Vec<RawFeedItem>,
}

/// Real client hitting the conversion endpoint over HTTPS.
pub struct HttpFeedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpFeedClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn request_url(&self, feed_url: &str) -> String {
        format!("{}?rss_url={}", self.endpoint, urlencoding::encode(feed_url))
    }
}

impl Default for HttpFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn get_feed(&self, feed_url: &str) -> Result<Vec<RawFeedItem>, FetchError> {
        let response = self.http.get(self.request_url(feed_url)).send().await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: FeedResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        Ok(body.items)
    }
}

/// Fetch step plus the never-fails policy: pre-request delay, then either
/// the live items or the fallback collection.
pub struct FeedFetcher {
    client: Arc<dyn FeedClient>,
    backoff: BackoffPolicy,
    clock: Arc<dyn Clock>,
}

impl FeedFetcher {
    pub fn new(client: Arc<dyn FeedClient>, backoff: BackoffPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            backoff,
            clock,
        }
    }

    pub fn backoff(&self) -> BackoffPolicy {
        self.backoff
    }

    /// Fetch one feed. Rate limiting returns the fallback immediately (no
    /// retry); any other failure also degrades to fallback, so the pipeline
    /// always has some data to work with.
    pub async fn fetch_items(&self, feed_url: &str) -> Vec<RawFeedItem> {
        tokio::time::sleep(self.backoff.pre_request).await;

        match self.client.get_feed(feed_url).await {
            Ok(items) => {
                debug!(feed = feed_url, count = items.len(), "feed fetched");
                items
            }
            Err(FetchError::RateLimited) => {
                warn!(feed = feed_url, "rate limit hit, substituting fallback items");
                counter!("aggregate_rate_limited_total").increment(1);
                fallback_raw_items(self.clock.now_ms())
            }
            Err(e) => {
                warn!(feed = feed_url, error = %e, "feed fetch failed, substituting fallback items");
                counter!("aggregate_fetch_errors_total").increment(1);
                fallback_raw_items(self.clock.now_ms())
            }
        }
    }
}
