//! RSS feeds via the rss2json proxy.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::FeedError;
use crate::types::NewsItem;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// rss2json endpoint.
pub const RSS2JSON_URL: &str = "https://api.rss2json.com/v1/api.json";

/// FierceBiotech RSS feed shown by the Biotech News widget.
pub const FIERCE_BIOTECH_RSS: &str = "https://www.fiercebiotech.com/rss/xml";

/// Source label for FierceBiotech items.
pub const FIERCE_BIOTECH_SOURCE: &str = "FierceBiotech";

/// Number of headlines requested.
pub const ITEM_COUNT: usize = 8;

#[derive(Deserialize)]
struct FeedResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    title: String,
    link: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
}

/// Parse an rss2json timestamp.
///
/// The proxy normally emits `YYYY-MM-DD HH:MM:SS` in UTC; RFC 2822 dates
/// straight from the feed are accepted as well.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc2822(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Parse an rss2json response, labelling every item with `source`.
pub fn parse_feed(body: &str, source: &str) -> Result<Vec<NewsItem>, FeedError> {
    let response: FeedResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(FeedError::Upstream(
            response
                .message
                .unwrap_or_else(|| "RSS feed error".to_string()),
        ));
    }
    Ok(response
        .items
        .into_iter()
        .map(|item| NewsItem {
            title: item.title,
            link: item.link,
            published: item.pub_date.as_deref().and_then(parse_pub_date),
            source: source.to_string(),
        })
        .collect())
}

/// Fetch the latest items of an RSS feed (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_feed(
    client: &FeedClient,
    rss_url: &str,
    source: &str,
) -> Result<Vec<NewsItem>, FeedError> {
    let count = ITEM_COUNT.to_string();
    let body = client.get_text(RSS2JSON_URL, &[("rss_url", rss_url), ("count", count.as_str())])?;
    parse_feed(&body, source)
}
