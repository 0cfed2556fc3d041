//! Wall Street Journal section feed.
//!
//! One linear pipeline per request:
//!
//! 1. **Resolve** the page URL and cookie from the language and category ([`region`])
//! 2. **Fetch** the section page ([`page`])
//! 3. **Extract** article stubs from the embedded `window.__STATE__` blob ([`state`])
//! 4. **Resolve articles**, at most [`ARTICLE_CONCURRENCY`] at a time, keeping input order ([`article`])
//! 5. **Assemble** the [`FeedResult`]
//!
//! Any failure aborts the whole request; there are no retries and no partial feeds.

pub mod article;
pub mod page;
pub mod region;
pub mod state;

use crate::error::FeedError;
use crate::models::{ArticleItem, ArticleStub, FeedResult, ResolvedTarget, RouteRequest};
use article::ResolveArticle;
use futures::stream::{self, StreamExt, TryStreamExt};
use page::PageFetcher;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Maximum number of article pages fetched at once.
pub const ARTICLE_CONCURRENCY: usize = 10;

/// Produce the feed for `request`.
///
/// `base_cookie` is the configured `wsj.cookie`; `None` sends no cookie.
#[instrument(level = "info", skip_all, fields(lang = %request.language, category = ?request.category))]
pub async fn generate_feed<R: ResolveArticle>(
    fetcher: &PageFetcher,
    resolver: &R,
    request: &RouteRequest,
    base_cookie: Option<&str>,
) -> Result<FeedResult, FeedError> {
    let target = region::resolve_target(request, base_cookie);
    generate_feed_for_target(fetcher, resolver, &target).await
}

/// Run steps 2 to 5 against an already resolved target.
pub async fn generate_feed_for_target<R: ResolveArticle>(
    fetcher: &PageFetcher,
    resolver: &R,
    target: &ResolvedTarget,
) -> Result<FeedResult, FeedError> {
    let t0 = Instant::now();
    let html = fetcher.fetch_page(&target.url, &target.cookie_header).await?;
    let stubs = state::extract_article_stubs(&html)?;
    let items = resolve_all(resolver, stubs, ARTICLE_CONCURRENCY).await?;
    let feed = assemble_feed(target, items);
    info!(
        url = %feed.link,
        items = feed.items.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Generated feed"
    );
    Ok(feed)
}

/// Resolve every stub with at most `limit` resolutions in flight.
///
/// `result[i]` always belongs to `stubs[i]`, whatever order the resolutions
/// finish in. The first failure is returned and the rest are dropped.
#[instrument(level = "info", skip_all, fields(count = stubs.len(), limit = limit))]
pub async fn resolve_all<R: ResolveArticle>(
    resolver: &R,
    stubs: Vec<ArticleStub>,
    limit: usize,
) -> Result<Vec<ArticleItem>, FeedError> {
    stream::iter(stubs)
        .map(|stub| async move {
            let link = stub.link.clone();
            resolver.resolve(stub).await.map_err(|e| {
                error!(%link, error = %e, "Article resolution failed");
                FeedError::Article {
                    link,
                    source: Box::new(e),
                }
            })
        })
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// Package resolved items under the target's title and link.
pub fn assemble_feed(target: &ResolvedTarget, items: Vec<ArticleItem>) -> FeedResult {
    let title = format!("WSJ{}", target.subtitle_suffix);
    FeedResult {
        description: title.clone(),
        title,
        link: target.url.clone(),
        items,
    }
}
