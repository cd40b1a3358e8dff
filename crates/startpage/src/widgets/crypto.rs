//! Crypto spot prices from CoinGecko.

use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use startpage_feeds::{coingecko, CryptoQuote};

use super::format::crypto_price;
use super::{MountContext, RemoteWidget};
use crate::refresh::FetchError;
use crate::registry::WidgetId;

/// Starts polling CoinGecko for [`WidgetId::Crypto`].
pub fn mount(ctx: &MountContext<'_>) -> RemoteWidget<Vec<CryptoQuote>> {
    let client = ctx.client();
    let handle = ctx.supervisor.mount(
        WidgetId::Crypto,
        move || coingecko::fetch_prices(&client).map_err(FetchError::from),
        ctx.options(WidgetId::Crypto),
    );
    RemoteWidget::new(handle, render)
}

/// One row per coin: symbol, name, price and 24h change.
#[allow(clippy::ptr_arg)]
pub fn render(quotes: &Vec<CryptoQuote>, width: u16, _now: DateTime<Local>) -> Vec<Line<'static>> {
    if quotes.is_empty() {
        return vec![Line::styled("No prices", Style::default().fg(Color::DarkGray))];
    }
    quotes
        .iter()
        .map(|quote| {
            let mut spans = vec![Span::styled(
                format!("{:<5}", quote.symbol),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if width >= 36 {
                spans.push(Span::styled(
                    format!("{:<9}", quote.name),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw(format!("{:>9} ", crypto_price(quote.price_usd))));
            spans.push(change_span(quote.change_24h));
            Line::from(spans)
        })
        .collect()
}

/// `▲ 2.35%` in green or `▼ 1.20%` in red.
fn change_span(change: f64) -> Span<'static> {
    if change >= 0.0 {
        Span::styled(
            format!("▲ {:.2}%", change.abs()),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!("▼ {:.2}%", change.abs()),
            Style::default().fg(Color::Red),
        )
    }
}
