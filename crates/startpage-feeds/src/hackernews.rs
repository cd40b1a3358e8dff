//! Hacker News Firebase API.

use crate::error::FeedError;
use crate::types::Story;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// Top stories endpoint (array of item ids).
pub const TOP_STORIES_URL: &str = "https://hacker-news.firebaseio.com/v0/topstories.json";

/// Item endpoint prefix; append `{id}.json`.
pub const ITEM_URL_PREFIX: &str = "https://hacker-news.firebaseio.com/v0/item/";

/// Number of top stories the dashboard shows.
pub const STORY_COUNT: usize = 8;

/// Parse the top stories response into at most `limit` ids.
pub fn parse_top_stories(body: &str, limit: usize) -> Result<Vec<u64>, FeedError> {
    let ids: Vec<u64> = serde_json::from_str(body)?;
    Ok(ids.into_iter().take(limit).collect())
}

/// Parse a single item response.
///
/// Deleted items come back as `null`; those are reported as `None`.
pub fn parse_item(body: &str) -> Result<Option<Story>, FeedError> {
    Ok(serde_json::from_str(body)?)
}

/// Fetch the ids of the current top stories (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_top_story_ids(client: &FeedClient, limit: usize) -> Result<Vec<u64>, FeedError> {
    let body = client.get_text(TOP_STORIES_URL, &[])?;
    parse_top_stories(&body, limit)
}

/// Fetch one story by id (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_item(client: &FeedClient, id: u64) -> Result<Option<Story>, FeedError> {
    let body = client.get_text(&format!("{ITEM_URL_PREFIX}{id}.json"), &[])?;
    parse_item(&body)
}
