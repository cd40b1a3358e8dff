//! Shared HTTP plumbing for all upstream sources.
//!
//! Requests are blocking; callers inside an async runtime are expected to
//! run them on a blocking thread (`tokio::task::spawn_blocking`).

use std::time::Duration;

use crate::error::FeedError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("startpage/", env!("CARGO_PKG_VERSION"));

/// Request settings shared by every source.
///
/// The underlying `reqwest` blocking client is built per request so that a
/// `FeedClient` can be cloned into async code and dropped there freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedClient {
    timeout: Duration,
}

impl FeedClient {
    /// Creates a client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a URL with query parameters and return the body (blocking).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if:
    /// - Network request fails or times out
    /// - Server returns 401/403 (unauthorized)
    /// - Server returns 429 (rate limited)
    /// - Server returns 5xx (server error)
    /// - Server returns any other non-200 status
    #[cfg(feature = "blocking")]
    pub fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let response = client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        map_response(response)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Map HTTP response to result, handling error status codes.
#[cfg(feature = "blocking")]
fn map_response(response: reqwest::blocking::Response) -> Result<String, FeedError> {
    let status = response.status().as_u16();

    match status {
        200 => response
            .text()
            .map_err(|e| FeedError::Network(e.to_string())),
        401 | 403 => Err(FeedError::Unauthorized),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            Err(FeedError::RateLimited { retry_after })
        }
        500..=599 => Err(FeedError::Server(status)),
        _ => Err(FeedError::Unexpected(status)),
    }
}
