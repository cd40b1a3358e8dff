//! Finnhub stock quote API (requires an API key).

use serde::Deserialize;

use crate::error::FeedError;
use crate::types::StockQuote;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// Quote endpoint.
pub const QUOTE_URL: &str = "https://finnhub.io/api/v1/quote";

/// Symbols shown by the Tech Stocks widget.
pub const TECH_SYMBOLS: &[&str] = &["AAPL", "GOOGL", "MSFT", "NVDA", "TSLA"];

/// Large caps scanned by the Today's Movers widget.
pub const MOVER_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK.B", "UNH", "JNJ", "V", "WMT",
    "XOM", "JPM", "PG", "MA", "HD", "CVX", "LLY", "ABBV", "AVGO", "KO", "MRK", "PEP", "COST",
    "TMO", "BAC",
];

#[derive(Deserialize)]
struct RawQuote {
    c: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
}

/// Parse a quote response for `symbol`.
///
/// Finnhub answers unknown symbols with zeros and nulls instead of an error
/// status, so a quote is only accepted when the current price is non-zero
/// and both change fields are present.
pub fn parse_quote(symbol: &str, body: &str) -> Result<StockQuote, FeedError> {
    let raw: RawQuote = serde_json::from_str(body)?;
    match raw {
        RawQuote {
            c: Some(price),
            d: Some(change),
            dp: Some(change_percent),
        } if price != 0.0 => Ok(StockQuote {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
        }),
        _ => Err(FeedError::Upstream(format!("no quote for {symbol}"))),
    }
}

/// Fetch one quote (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_quote(
    client: &FeedClient,
    symbol: &str,
    token: &str,
) -> Result<StockQuote, FeedError> {
    let body = client.get_text(QUOTE_URL, &[("symbol", symbol), ("token", token)])?;
    parse_quote(symbol, &body)
}
