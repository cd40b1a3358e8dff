//! # startpage-feeds
//!
//! Blocking clients for the upstream data sources behind the startpage
//! dashboard widgets.
//!
//! Each source module exposes:
//!
//! - a pure `parse_*` function turning a response body into typed data, and
//! - a blocking `fetch_*` function (feature `blocking`, on by default) that
//!   performs the request through a [`FeedClient`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use startpage_feeds::{coingecko, FeedClient};
//!
//! let client = FeedClient::default();
//! for quote in coingecko::fetch_prices(&client)? {
//!     println!("{} ${:.2}", quote.symbol, quote.price_usd);
//! }
//! ```

pub mod client;
pub mod coingecko;
pub mod error;
pub mod finnhub;
pub mod github;
pub mod hackernews;
pub mod news;
pub mod types;
pub mod weather;

pub use client::FeedClient;
pub use error::FeedError;
pub use types::{CryptoQuote, NewsItem, Repository, StockQuote, Story, WeatherReport};
