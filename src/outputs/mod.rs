//! Feed output formats.
//!
//! - [`rss`]: RSS 2.0 XML, the default
//! - [`json`]: the feed object as JSON
//!
//! Output goes to stdout unless a file path is given; logs always go to
//! stderr so the two never mix.

pub mod json;
pub mod rss;

use crate::error::FeedError;
use crate::models::FeedResult;
use chrono::Utc;
use clap::ValueEnum;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Rss,
    Json,
}

/// Render `feed` in `format`.
pub fn render(feed: &FeedResult, format: OutputFormat) -> Result<String, FeedError> {
    match format {
        OutputFormat::Rss => rss::render_rss(feed, Utc::now()),
        OutputFormat::Json => json::render_json(feed),
    }
}

/// Write a rendered document to `path`, or stdout when `path` is `None`.
#[instrument(level = "info", skip_all, fields(path = ?path))]
pub async fn write_output(document: &str, path: Option<&Path>) -> Result<(), FeedError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            fs::write(path, document).await?;
            info!(bytes = document.len(), "Wrote feed file");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(document.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_feed() -> FeedResult {
        FeedResult {
            title: "WSJ - EN-US".to_string(),
            link: "https://www.wsj.com".to_string(),
            description: "WSJ - EN-US".to_string(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let feed = empty_feed();
        assert!(render(&feed, OutputFormat::Rss).unwrap().contains("<rss"));
        assert!(render(&feed, OutputFormat::Json).unwrap().contains("\"item\": []"));
    }

    #[tokio::test]
    async fn test_write_output_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("wsj_feed_test_{}", std::process::id()));
        let path = dir.join("nested").join("feed.xml");

        write_output("<rss/>", Some(path.as_path())).await.unwrap();
        assert_eq!(fs::read_to_string(&path).await.unwrap(), "<rss/>");

        let _ = fs::remove_dir_all(&dir).await;
    }
}
