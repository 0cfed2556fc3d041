//! JSON rendering.
//!
//! The document mirrors the feed object handed to feed serializers:
//! `{ "title", "link", "description", "item": [...] }`.

use crate::error::FeedError;
use crate::models::FeedResult;
use tracing::instrument;

/// Serialize `feed` as pretty-printed JSON.
#[instrument(level = "debug", skip_all, fields(items = feed.items.len()))]
pub fn render_json(feed: &FeedResult) -> Result<String, FeedError> {
    serde_json::to_string_pretty(feed).map_err(|e| FeedError::Render(e.to_string()))
}
