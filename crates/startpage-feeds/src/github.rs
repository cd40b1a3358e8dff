//! GitHub repository search API (unauthenticated).

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::error::FeedError;
use crate::types::Repository;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// Repository search endpoint.
pub const SEARCH_URL: &str = "https://api.github.com/search/repositories";

/// Search query for the Bioinfo Repos widget.
pub const BIOINFO_QUERY: &str = "bioinformatics genomics in:description,readme";

/// Number of repositories requested per search.
pub const PER_PAGE: usize = 6;

#[derive(Deserialize)]
struct SearchResponse {
    items: Vec<RawRepo>,
}

#[derive(Deserialize)]
struct RawRepo {
    name: String,
    owner: RawOwner,
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    language: Option<String>,
}

#[derive(Deserialize)]
struct RawOwner {
    login: String,
}

/// Search query for repositories created in the week before `today`.
pub fn trending_query(today: NaiveDate) -> String {
    let since = today - Duration::days(7);
    format!("created:>{}", since.format("%Y-%m-%d"))
}

/// Parse a repository search response.
pub fn parse_search(body: &str) -> Result<Vec<Repository>, FeedError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .into_iter()
        .map(|r| Repository {
            name: r.name,
            owner: r.owner.login,
            description: r
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            url: r.html_url,
            stars: r.stargazers_count,
            forks: r.forks_count,
            language: r.language.unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect())
}

/// Run a search sorted by stars, descending (blocking).
#[cfg(feature = "blocking")]
pub fn search_repositories(client: &FeedClient, query: &str) -> Result<Vec<Repository>, FeedError> {
    let per_page = PER_PAGE.to_string();
    let body = client.get_text(
        SEARCH_URL,
        &[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
            ("per_page", per_page.as_str()),
        ],
    )?;
    parse_search(&body)
}
