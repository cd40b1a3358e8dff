//! Typed payloads returned by the upstream sources.
//!
//! Only the fields the dashboard widgets display are modelled; everything
//! else in the upstream JSON is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Hacker News story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    /// Item id.
    pub id: u64,
    /// Story title.
    #[serde(default)]
    pub title: String,
    /// Link target. Ask HN and job posts have none.
    #[serde(default)]
    pub url: Option<String>,
    /// Current score.
    #[serde(default)]
    pub score: u32,
    /// Submitting user.
    #[serde(default)]
    pub by: String,
    /// Submission time as a unix timestamp.
    #[serde(default)]
    pub time: i64,
}

impl Story {
    /// Host of the story URL without a leading `www.`.
    ///
    /// Returns an empty string when the story has no URL or the URL does not
    /// parse.
    pub fn domain(&self) -> String {
        self.url
            .as_deref()
            .and_then(|u| reqwest::Url::parse(u).ok())
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_default()
    }

    /// Seconds elapsed between submission and `now`.
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now.timestamp() - self.time).max(0)
    }
}

/// Spot price of a cryptocurrency in USD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoQuote {
    /// CoinGecko coin id (`bitcoin`).
    pub id: String,
    /// Ticker symbol (`BTC`).
    pub symbol: String,
    /// Human-readable name (`Bitcoin`).
    pub name: String,
    /// Current price in USD.
    pub price_usd: f64,
    /// Change over the last 24 hours, in percent.
    pub change_24h: f64,
}

/// Latest quote for a stock symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockQuote {
    /// Ticker symbol.
    pub symbol: String,
    /// Current price.
    pub price: f64,
    /// Absolute change since previous close.
    pub change: f64,
    /// Percent change since previous close.
    pub change_percent: f64,
}

/// A GitHub repository search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Owner login.
    pub owner: String,
    /// Description, or "No description".
    pub description: String,
    /// Web URL.
    pub url: String,
    /// Stargazer count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
    /// Primary language, or "Unknown".
    pub language: String,
}

/// A headline from a news feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Article link.
    pub link: String,
    /// Publication time, if the feed supplied a parseable one.
    pub published: Option<DateTime<Utc>>,
    /// Feed name shown next to the headline.
    pub source: String,
}

/// Current weather conditions at a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    /// Temperature in °C, rounded.
    pub temp_c: i32,
    /// Apparent temperature in °C, rounded.
    pub feels_like_c: i32,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in km/h, rounded.
    pub wind_kmh: i32,
    /// Visibility in km, rounded.
    pub visibility_km: i32,
    /// Free-text description (`light rain`).
    pub description: String,
    /// Condition group (`Rain`, `Clear`, ...).
    pub condition: String,
    /// Name of the nearest city.
    pub city: String,
}
