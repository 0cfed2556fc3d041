//! Embedded page state extraction.
//!
//! WSJ section pages ship their client-side state as a JSON object assigned
//! to `window.__STATE__` inside a `<script>` tag. The `data` map of that
//! object holds one entry per rendered module; article entries are keyed
//! `article…` and carry their headline and canonical URL under `data.data`.
//!
//! This is the part of the pipeline that breaks when WSJ changes its page
//! structure, so every failure surfaces as [`FeedError::Parse`].

use crate::error::FeedError;
use crate::models::ArticleStub;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub const STATE_MARKER: &str = "window.__STATE__";

const ARTICLE_KEY_PREFIX: &str = "article";

/// Path segment present in every canonical article URL.
const ARTICLE_PATH: &str = "wsj.com/articles/";

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("valid script selector"));

/// Extract the ordered article stubs from a WSJ section page.
///
/// # Errors
///
/// [`FeedError::Parse`] if no script carries the state marker, the script
/// holds no balanced JSON object, the object is not valid JSON, or it has
/// no `data` map.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn extract_article_stubs(html: &str) -> Result<Vec<ArticleStub>, FeedError> {
    let script = find_state_script(html)
        .ok_or_else(|| FeedError::Parse(format!("no script containing {STATE_MARKER}")))?;

    let raw = extract_balanced_object(&script)
        .ok_or_else(|| FeedError::Parse("state script holds no complete JSON object".to_string()))?;

    let state: Value = serde_json::from_str(raw).map_err(|e| {
        warn!(error = %e, preview = %truncate_for_log(raw, 200), "State blob is not valid JSON");
        FeedError::Parse(format!("state blob is not valid JSON: {e}"))
    })?;

    let data = state
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| FeedError::Parse("state blob has no `data` map".to_string()))?;

    let candidates = data.iter().filter_map(|(key, value)| {
        let inner = value.get("data")?.get("data")?;
        let Some(link) = inner.get("url").and_then(Value::as_str) else {
            if key.starts_with(ARTICLE_KEY_PREFIX) {
                debug!(%key, "Article entry without url; skipping");
            }
            return None;
        };
        let title = inner
            .get("headline")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(ArticleStub {
            title: title.to_string(),
            link: link.to_string(),
            source_key: key.clone(),
        })
    });

    let stubs = retain_articles(candidates);
    info!(entries = data.len(), articles = stubs.len(), "Extracted article stubs");
    Ok(stubs)
}

/// Keep only stubs that point at genuine articles, preserving order.
///
/// Applying this twice gives the same result as applying it once.
pub fn retain_articles(stubs: impl IntoIterator<Item = ArticleStub>) -> Vec<ArticleStub> {
    stubs
        .into_iter()
        .filter(|stub| is_article_entry(&stub.source_key, &stub.link))
        .collect()
}

pub fn is_article_entry(key: &str, link: &str) -> bool {
    key.starts_with(ARTICLE_KEY_PREFIX) && link.contains(ARTICLE_PATH)
}

/// Text of the first `<script>` whose contents mention [`STATE_MARKER`].
fn find_state_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .find(|text| text.contains(STATE_MARKER))
}

/// Return the first balanced `{…}` object in `s`.
///
/// Tracks brace depth while skipping over JSON string literals and their
/// escapes, so braces inside headlines never end the object early and
/// trailing script after the object is never swallowed.
pub fn extract_balanced_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let body = &s[start..];
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in body.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&body[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
