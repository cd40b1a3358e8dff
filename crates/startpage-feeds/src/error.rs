//! Error types for the startpage-feeds crate.

use thiserror::Error;

/// Errors that can occur when talking to an upstream data source.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Server rejected the credentials (401/403).
    #[error("Unauthorized. Check the configured API key.")]
    Unauthorized,

    /// Server is throttling requests (429).
    #[error("Rate limited{}", retry_after.as_ref().map(|r| format!(" (retry after {r}s)")).unwrap_or_default())]
    RateLimited {
        /// Value of the `retry-after` header, if the server sent one.
        retry_after: Option<String>,
    },

    /// Server returned a 5xx status.
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// Server returned a status this crate does not handle.
    #[error("Unexpected response: HTTP {0}")]
    Unexpected(u16),

    /// Response body was not the JSON shape we expected.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Upstream answered successfully but reported an error in the payload.
    #[error("Upstream reported an error: {0}")]
    Upstream(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display_includes_retry_after() {
        let err = FeedError::RateLimited {
            retry_after: Some("30".to_string()),
        };
        assert_eq!(err.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn rate_limited_display_without_header() {
        let err = FeedError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited");
    }

    #[test]
    fn json_error_converts_to_parse() {
        let err = serde_json::from_str::<Vec<u32>>("{").expect_err("invalid json");
        let feed: FeedError = err.into();
        assert!(matches!(feed, FeedError::Parse(_)));
    }
}
