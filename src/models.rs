//! Data models for feed requests, extracted stubs and resolved articles.
//!
//! - [`Language`] and [`RouteRequest`]: what the caller asked for
//! - [`ResolvedTarget`]: where to fetch it from and with which cookie
//! - [`ArticleStub`]: an article reference pulled out of the embedded page state
//! - [`ArticleItem`]: a stub after its full content has been resolved
//! - [`FeedResult`]: the assembled feed handed to a renderer

use crate::error::FeedError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A category must fit in one URL path segment.
static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/?#%\s]+$").expect("valid category regex"));

/// Edition language of the WSJ site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    EnUs,
    ZhCn,
    ZhTw,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::EnUs, Language::ZhCn, Language::ZhTw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::EnUs => "en-us",
            Language::ZhCn => "zh-cn",
            Language::ZhTw => "zh-tw",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en-us" => Ok(Language::EnUs),
            "zh-cn" => Ok(Language::ZhCn),
            "zh-tw" => Ok(Language::ZhTw),
            other => {
                let expected: Vec<&str> = Language::ALL.iter().map(Language::as_str).collect();
                Err(FeedError::InvalidParameter(format!(
                    "unsupported language `{other}` (expected one of {})",
                    expected.join(", ")
                )))
            }
        }
    }
}

/// One incoming feed request, `/:lang/:category?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub language: Language,
    /// `None` for the language's front page. Never `Some("")`.
    pub category: Option<String>,
}

impl RouteRequest {
    /// Build a request, normalizing an empty category to `None`.
    ///
    /// # Errors
    ///
    /// [`FeedError::InvalidParameter`] when the category cannot be used as a
    /// single path segment.
    pub fn new(language: Language, category: Option<&str>) -> Result<Self, FeedError> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if CATEGORY_RE.is_match(c) => Some(c.to_string()),
            Some(c) => {
                return Err(FeedError::InvalidParameter(format!(
                    "category `{c}` is not a valid path segment"
                )));
            }
        };
        Ok(Self { language, category })
    }

    /// Parse a route path such as `/en-us/opinion`, `zh-cn` or `/wsj/zh-tw/china/`.
    ///
    /// A leading `wsj/` mount segment is accepted and ignored.
    pub fn from_path(path: &str) -> Result<Self, FeedError> {
        let mut segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() > 1 && segments[0] == "wsj" {
            segments.remove(0);
        }

        match segments.as_slice() {
            [lang] => Self::new(lang.parse()?, None),
            [lang, category] => Self::new(lang.parse()?, Some(*category)),
            [] => Err(FeedError::InvalidParameter("empty route".to_string())),
            _ => Err(FeedError::InvalidParameter(format!(
                "route `{path}` has too many segments (expected lang[/category])"
            ))),
        }
    }
}

impl FromStr for RouteRequest {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

/// Where a [`RouteRequest`] is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub url: String,
    /// Empty when no base cookie is configured.
    pub cookie_header: String,
    /// ` - EN-US` or ` - EN-US - opinion`.
    pub subtitle_suffix: String,
}

/// An article reference extracted from the embedded page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleStub {
    pub title: String,
    pub link: String,
    /// Key of the entry in the state blob's `data` map.
    pub source_key: String,
}

/// A fully resolved article, ready to become a feed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleItem {
    pub title: String,
    pub link: String,
    /// Article body as HTML.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip)]
    pub source_key: String,
}

impl ArticleItem {
    /// An item carrying only what the stub already knows.
    pub fn from_stub(stub: ArticleStub) -> Self {
        Self {
            title: stub.title,
            link: stub.link,
            description: String::new(),
            summary: None,
            pub_date: None,
            author: None,
            category: None,
            source_key: stub.source_key,
        }
    }
}

/// The assembled feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedResult {
    pub title: String,
    pub link: String,
    pub description: String,
    #[serde(rename = "item")]
    pub items: Vec<ArticleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip_codes() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
        assert_eq!("EN-US".parse::<Language>().unwrap(), Language::EnUs);
    }

    #[test]
    fn test_unsupported_language_is_invalid_parameter() {
        let err = "fr-fr".parse::<Language>().unwrap_err();
        assert!(matches!(err, FeedError::InvalidParameter(_)));
    }

    #[test]
    fn test_route_from_path_with_category() {
        let req = RouteRequest::from_path("/en-us/opinion").unwrap();
        assert_eq!(req.language, Language::EnUs);
        assert_eq!(req.category.as_deref(), Some("opinion"));
    }

    #[test]
    fn test_route_from_path_without_category() {
        let req = RouteRequest::from_path("zh-cn/").unwrap();
        assert_eq!(req.language, Language::ZhCn);
        assert_eq!(req.category, None);
    }

    #[test]
    fn test_route_from_path_strips_mount_segment() {
        let req = RouteRequest::from_path("/wsj/zh-tw/china").unwrap();
        assert_eq!(req.language, Language::ZhTw);
        assert_eq!(req.category.as_deref(), Some("china"));
    }

    #[test]
    fn test_route_from_path_rejects_extra_segments() {
        let err = RouteRequest::from_path("/en-us/opinion/extra").unwrap_err();
        assert!(matches!(err, FeedError::InvalidParameter(_)));
        let err = RouteRequest::from_path("/").unwrap_err();
        assert!(matches!(err, FeedError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_category_normalizes_to_none() {
        let req = RouteRequest::new(Language::EnUs, Some("  ")).unwrap();
        assert_eq!(req.category, None);
    }

    #[test]
    fn test_category_with_query_chars_is_rejected() {
        for bad in ["a?b", "a#b", "news%2F", "two words"] {
            let err = RouteRequest::new(Language::EnUs, Some(bad)).unwrap_err();
            assert!(matches!(err, FeedError::InvalidParameter(_)), "{bad}");
        }
    }

    #[test]
    fn test_feed_result_serializes_item_key() {
        let feed = FeedResult {
            title: "WSJ - EN-US".to_string(),
            link: "https://www.wsj.com".to_string(),
            description: "WSJ - EN-US".to_string(),
            items: vec![ArticleItem::from_stub(ArticleStub {
                title: "Headline".to_string(),
                link: "https://www.wsj.com/articles/headline".to_string(),
                source_key: "article_1".to_string(),
            })],
        };
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["item"][0]["title"], "Headline");
        assert!(json["item"][0].get("source_key").is_none());
        assert!(json["item"][0].get("pubDate").is_none());
    }
}
