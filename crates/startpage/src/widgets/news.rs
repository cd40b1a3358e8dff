//! Biotech headlines from FierceBiotech via rss2json.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use startpage_feeds::{news, NewsItem};

use super::format::{published_ago, truncate};
use super::{MountContext, RemoteWidget};
use crate::refresh::FetchError;
use crate::registry::WidgetId;

/// Starts polling the feed for [`WidgetId::BiotechNews`].
pub fn mount(ctx: &MountContext<'_>) -> RemoteWidget<Vec<NewsItem>> {
    let client = ctx.client();
    let handle = ctx.supervisor.mount(
        WidgetId::BiotechNews,
        move || {
            news::fetch_feed(&client, news::FIERCE_BIOTECH_RSS, news::FIERCE_BIOTECH_SOURCE)
                .map_err(FetchError::from)
        },
        ctx.options(WidgetId::BiotechNews),
    );
    RemoteWidget::new(handle, render)
}

/// Headline plus a dim `source, age` line per item.
#[allow(clippy::ptr_arg)]
pub fn render(items: &Vec<NewsItem>, width: u16, now: DateTime<Local>) -> Vec<Line<'static>> {
    if items.is_empty() {
        return vec![Line::styled("No headlines", Style::default().fg(Color::DarkGray))];
    }
    let now = now.with_timezone(&Utc);
    let title_width = usize::from(width.saturating_sub(2)).max(8);
    items
        .iter()
        .flat_map(|item| {
            let meta = match item.published {
                Some(published) => format!("  {}, {}", item.source, published_ago(published, now)),
                None => format!("  {}", item.source),
            };
            [
                Line::raw(truncate(&item.title, title_width)),
                Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
            ]
        })
        .collect()
}
