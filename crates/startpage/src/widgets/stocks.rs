//! Finnhub-backed stock widgets: a fixed tech watchlist and the day's
//! biggest movers.
//!
//! Both look up one quote per symbol through [`gather`], so a bad symbol
//! only drops its own row.

use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use startpage_feeds::{finnhub, FeedClient, StockQuote};

use super::format::{signed_percent, stock_price};
use super::{MountContext, RemoteWidget, Widget};
use crate::refresh::{gather, FetchError, SupervisorHandle};
use crate::registry::WidgetId;

/// Rows shown per side in the movers widget.
pub const MOVERS_PER_SIDE: usize = 3;

const NO_KEY: &str = "API key not configured";

/// Quotes that arrived plus the symbols that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    /// Quotes in symbol order.
    pub quotes: Vec<StockQuote>,
    /// Symbols whose lookup failed.
    pub missing: Vec<String>,
}

/// Looks up every symbol in parallel.
pub fn fetch_watchlist(
    client: &FeedClient,
    symbols: &[String],
    token: Option<&str>,
) -> Result<Watchlist, FetchError> {
    let token = token.ok_or(FetchError::NotConfigured(NO_KEY))?;
    let partial = gather(symbols, |symbol| {
        finnhub::fetch_quote(client, symbol, token).map_err(FetchError::from)
    })?;
    Ok(Watchlist {
        quotes: partial.items,
        missing: partial.failures.into_iter().map(|f| f.source).collect(),
    })
}

// ---------------------------------------------------------------------------
// Tech stocks
// ---------------------------------------------------------------------------

/// Starts polling the tech watchlist for [`WidgetId::TechStocks`].
pub fn mount_tech(ctx: &MountContext<'_>) -> RemoteWidget<Watchlist> {
    let client = ctx.client();
    let symbols = ctx.config.sources.tech_symbols.clone();
    let token = ctx.config.sources.finnhub_key();
    let handle = ctx.supervisor.mount(
        WidgetId::TechStocks,
        move || fetch_watchlist(&client, &symbols, token.as_deref()),
        ctx.options(WidgetId::TechStocks),
    );
    RemoteWidget::new(handle, render_watchlist)
}

/// One row per symbol, then a note about missing symbols.
pub fn render_watchlist(
    list: &Watchlist,
    _width: u16,
    _now: DateTime<Local>,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = list.quotes.iter().map(quote_row).collect();
    if lines.is_empty() {
        lines.push(Line::styled("No quotes", Style::default().fg(Color::DarkGray)));
    }
    if !list.missing.is_empty() {
        lines.push(Line::styled(
            format!("unavailable: {}", list.missing.join(", ")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines
}

fn quote_row(quote: &StockQuote) -> Line<'static> {
    let color = if quote.change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Line::from(vec![
        Span::styled(
            format!("{:<6}", quote.symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:>10} ", stock_price(quote.price))),
        Span::styled(signed_percent(quote.change_percent), Style::default().fg(color)),
    ])
}

// ---------------------------------------------------------------------------
// Movers
// ---------------------------------------------------------------------------

/// Top gainers and losers by percent change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Movers {
    /// Biggest positive moves, largest first.
    pub gainers: Vec<StockQuote>,
    /// Biggest negative moves, largest magnitude first.
    pub losers: Vec<StockQuote>,
}

/// Ranks `quotes` by absolute percent change and keeps the top
/// [`MOVERS_PER_SIDE`] on each side. Unchanged symbols are on neither side.
pub fn rank_movers(mut quotes: Vec<StockQuote>) -> Movers {
    quotes.sort_by(|a, b| b.change_percent.abs().total_cmp(&a.change_percent.abs()));
    let gainers = quotes
        .iter()
        .filter(|q| q.change_percent > 0.0)
        .take(MOVERS_PER_SIDE)
        .cloned()
        .collect();
    let losers = quotes
        .iter()
        .filter(|q| q.change_percent < 0.0)
        .take(MOVERS_PER_SIDE)
        .cloned()
        .collect();
    Movers { gainers, losers }
}

/// Movers widget with a gainers/losers toggle on `g`.
pub struct MoversWidget {
    handle: SupervisorHandle<Movers>,
    show_gainers: bool,
}

/// Starts scanning the mover universe for [`WidgetId::StockMovers`].
pub fn mount_movers(ctx: &MountContext<'_>) -> MoversWidget {
    let client = ctx.client();
    let symbols = ctx.config.sources.mover_symbols.clone();
    let token = ctx.config.sources.finnhub_key();
    let handle = ctx.supervisor.mount(
        WidgetId::StockMovers,
        move || {
            fetch_watchlist(&client, &symbols, token.as_deref())
                .map(|list| rank_movers(list.quotes))
        },
        ctx.options(WidgetId::StockMovers),
    );
    MoversWidget {
        handle,
        show_gainers: true,
    }
}

impl MoversWidget {
    /// Whether gainers (rather than losers) are displayed.
    pub fn showing_gainers(&self) -> bool {
        self.show_gainers
    }
}

impl Widget for MoversWidget {
    fn id(&self) -> WidgetId {
        WidgetId::StockMovers
    }

    fn render(&self, _width: u16, _now: DateTime<Local>) -> Vec<Line<'static>> {
        let show_gainers = self.show_gainers;
        let state = self.handle.state();
        super::remote::render_view(state.view(self.handle.show_stale()), |movers| {
            render_movers(movers, show_gainers)
        })
    }

    fn refresh_now(&self) -> bool {
        self.handle.refresh_now()
    }

    fn is_refreshing(&self) -> bool {
        self.handle.is_in_flight()
    }

    fn handle_key(&mut self, key: char) -> bool {
        if key == 'g' {
            self.show_gainers = !self.show_gainers;
            true
        } else {
            false
        }
    }

    fn key_hint(&self) -> Option<&'static str> {
        Some("g: gainers/losers")
    }
}

/// Tab header followed by the selected side.
pub fn render_movers(movers: &Movers, show_gainers: bool) -> Vec<Line<'static>> {
    let active = Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED);
    let inactive = Style::default().fg(Color::DarkGray);
    let (gainer_style, loser_style) = if show_gainers {
        (active.fg(Color::Green), inactive)
    } else {
        (inactive, active.fg(Color::Red))
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Gainers", gainer_style),
        Span::raw(" | "),
        Span::styled("Losers", loser_style),
    ])];

    let (rows, empty) = if show_gainers {
        (&movers.gainers, "No gainers today")
    } else {
        (&movers.losers, "No losers today")
    };
    if rows.is_empty() {
        lines.push(Line::styled(empty, Style::default().fg(Color::DarkGray)));
    } else {
        lines.extend(rows.iter().map(quote_row));
    }
    lines
}
