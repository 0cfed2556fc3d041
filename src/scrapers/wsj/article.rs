//! Full-article resolution.
//!
//! [`ResolveArticle`] is the seam between the feed pipeline and whatever
//! turns an [`ArticleStub`] into a complete [`ArticleItem`]. The default
//! [`HttpArticleResolver`] downloads the article page and reads the body and
//! metadata out of its markup.

use super::page::PageFetcher;
use crate::error::FeedError;
use crate::models::{ArticleItem, ArticleStub};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

/// Turns one stub into a complete article.
pub trait ResolveArticle {
    async fn resolve(&self, stub: ArticleStub) -> Result<ArticleItem, FeedError>;
}

/// Body containers, most specific first.
static BODY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        r#"section[subscriptions-section="content"]"#,
        "div.article-content",
        "article",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("valid body selector"))
    .collect()
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));

static SUMMARY_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    meta_selectors(&[r#"meta[name="description"]"#, r#"meta[property="og:description"]"#])
});

static PUBLISHED_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    meta_selectors(&[
        r#"meta[name="article.published"]"#,
        r#"meta[itemprop="datePublished"]"#,
        r#"meta[property="article:published_time"]"#,
    ])
});

static AUTHOR_META: Lazy<Vec<Selector>> =
    Lazy::new(|| meta_selectors(&[r#"meta[name="author"]"#]));

static SECTION_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    meta_selectors(&[
        r#"meta[name="article.section"]"#,
        r#"meta[property="article:section"]"#,
    ])
});

static TITLE_META: Lazy<Vec<Selector>> =
    Lazy::new(|| meta_selectors(&[r#"meta[property="og:title"]"#]));

fn meta_selectors(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).expect("valid meta selector"))
        .collect()
}

/// Resolves articles by fetching their pages with the feed's cookie.
#[derive(Debug, Clone)]
pub struct HttpArticleResolver {
    fetcher: PageFetcher,
    cookie: String,
}

impl HttpArticleResolver {
    pub fn new(fetcher: PageFetcher, cookie: impl Into<String>) -> Self {
        Self {
            fetcher,
            cookie: cookie.into(),
        }
    }
}

impl ResolveArticle for HttpArticleResolver {
    #[instrument(level = "debug", skip_all, fields(link = %stub.link))]
    async fn resolve(&self, stub: ArticleStub) -> Result<ArticleItem, FeedError> {
        let url = Url::parse(&stub.link)
            .map_err(|e| FeedError::InvalidParameter(format!("article link `{}`: {e}", stub.link)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FeedError::InvalidParameter(format!(
                "article link `{}` is not http(s)",
                stub.link
            )));
        }

        let html = self.fetcher.fetch_page(url.as_str(), &self.cookie).await?;
        Ok(parse_article_page(stub, &html))
    }
}

/// Fill an [`ArticleItem`] from a downloaded article page.
///
/// Missing pieces stay empty; a page with no recognizable body falls back to
/// its summary so the feed item is never blank when the page has metadata.
pub fn parse_article_page(stub: ArticleStub, html: &str) -> ArticleItem {
    let document = Html::parse_document(html);
    let mut item = ArticleItem::from_stub(stub);

    if item.title.is_empty() {
        if let Some(title) = first_meta(&document, &TITLE_META) {
            item.title = title;
        }
    }

    item.summary = first_meta(&document, &SUMMARY_META);
    item.author = first_meta(&document, &AUTHOR_META);
    item.category = first_meta(&document, &SECTION_META);
    item.pub_date = first_meta(&document, &PUBLISHED_META).and_then(|raw| {
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(date) => Some(date.with_timezone(&Utc)),
            Err(e) => {
                warn!(%raw, error = %e, "Unparseable publication date");
                None
            }
        }
    });

    item.description = BODY_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .map(body_html)
        .filter(|body| !body.trim().is_empty())
        .or_else(|| item.summary.clone())
        .unwrap_or_default();

    debug!(
        bytes = item.description.len(),
        has_date = item.pub_date.is_some(),
        "Parsed article page"
    );
    item
}

/// Paragraphs of the body container, or its whole markup when it has none.
fn body_html(container: ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = container
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.inner_html().trim().to_string())
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{p}</p>"))
        .collect();

    if paragraphs.is_empty() {
        container.inner_html().trim().to_string()
    } else {
        paragraphs.join("\n")
    }
}

fn first_meta(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .flat_map(|selector| document.select(selector))
        .filter_map(|element| element.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}
