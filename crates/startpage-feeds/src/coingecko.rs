//! CoinGecko simple price API (no key required).

use serde_json::Value;

use crate::error::FeedError;
use crate::types::CryptoQuote;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// Simple price endpoint.
pub const SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Coins shown by the dashboard: (coingecko id, symbol, name).
pub const COINS: &[(&str, &str, &str)] = &[
    ("bitcoin", "BTC", "Bitcoin"),
    ("ethereum", "ETH", "Ethereum"),
    ("solana", "SOL", "Solana"),
    ("cardano", "ADA", "Cardano"),
];

/// Parse a `simple/price` response for the given coins.
///
/// Every requested coin must be present; a missing coin means the response
/// is not what we asked for and the whole payload is rejected.
pub fn parse_simple_price(
    body: &str,
    coins: &[(&str, &str, &str)],
) -> Result<Vec<CryptoQuote>, FeedError> {
    let value: Value = serde_json::from_str(body)?;
    coins
        .iter()
        .map(|&(id, symbol, name)| {
            let entry = value
                .get(id)
                .ok_or_else(|| FeedError::Parse(format!("missing coin `{id}`")))?;
            let price_usd = entry
                .get("usd")
                .and_then(Value::as_f64)
                .ok_or_else(|| FeedError::Parse(format!("missing usd price for `{id}`")))?;
            let change_24h = entry
                .get("usd_24h_change")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            Ok(CryptoQuote {
                id: id.to_string(),
                symbol: symbol.to_string(),
                name: name.to_string(),
                price_usd,
                change_24h,
            })
        })
        .collect()
}

/// Fetch prices for [`COINS`] (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_prices(client: &FeedClient) -> Result<Vec<CryptoQuote>, FeedError> {
    let ids = COINS
        .iter()
        .map(|(id, _, _)| *id)
        .collect::<Vec<_>>()
        .join(",");
    let body = client.get_text(
        SIMPLE_PRICE_URL,
        &[
            ("ids", ids.as_str()),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
        ],
    )?;
    parse_simple_price(&body, COINS)
}
