//! Error taxonomy for the feed pipeline.
//!
//! Every stage of the pipeline returns [`FeedError`]. Nothing is recovered
//! locally: the first failure aborts the run and no partial feed is written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Unsupported language, malformed category or route, or an unusable article link.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The embedded state blob is missing or no longer has the expected shape.
    #[error("failed to parse embedded page state: {0}")]
    Parse(String),

    #[error("failed to resolve article {link}: {source}")]
    Article {
        link: String,
        #[source]
        source: Box<FeedError>,
    },

    #[error("failed to render feed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// True for transport failures and non-success HTTP statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, FeedError::Network(_) | FeedError::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_network() {
        let err = FeedError::HttpStatus {
            status: 503,
            url: "https://www.wsj.com/opinion".to_string(),
        };
        assert!(err.is_network());
        assert_eq!(err.to_string(), "HTTP 503 from https://www.wsj.com/opinion");
    }

    #[test]
    fn test_article_error_wraps_source() {
        let err = FeedError::Article {
            link: "https://www.wsj.com/articles/x".to_string(),
            source: Box::new(FeedError::Parse("no body".to_string())),
        };
        assert!(!err.is_network());
        assert!(err.to_string().contains("https://www.wsj.com/articles/x"));
        assert!(err.to_string().contains("no body"));
    }
}
