//! HTTP access to WSJ pages.

use crate::error::FeedError;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) wsj_feed/",
    env!("CARGO_PKG_VERSION")
);

/// Thin wrapper over [`reqwest::Client`] that sends the headers WSJ expects.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body text.
    ///
    /// Sends `accept-language: zh` and, when non-empty, `cookie`. Not retried.
    ///
    /// # Errors
    ///
    /// [`FeedError::Network`] on transport failure, [`FeedError::HttpStatus`]
    /// on any non-success status.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_page(&self, url: &str, cookie: &str) -> Result<String, FeedError> {
        let t0 = Instant::now();
        let mut request = self.client.get(url).header(ACCEPT_LANGUAGE, "zh");
        if !cookie.is_empty() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Page fetch returned non-success status");
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        debug!(has_cookie = !cookie.is_empty(), "Request headers applied");
        Ok(body)
    }
}
