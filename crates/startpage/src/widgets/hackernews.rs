//! Hacker News front page.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use startpage_feeds::{hackernews, FeedClient, Story};

use super::format::{time_ago, truncate};
use super::{MountContext, RemoteWidget};
use crate::refresh::{gather, FetchError};
use crate::registry::WidgetId;

/// Top story ids, then every item in parallel. Stories without a link are
/// dropped.
pub fn fetch_stories(client: &FeedClient) -> Result<Vec<Story>, FetchError> {
    let ids = hackernews::fetch_top_story_ids(client, hackernews::STORY_COUNT)?;
    let partial = gather(&ids, |id| {
        hackernews::fetch_item(client, *id).map_err(FetchError::from)
    })?;
    Ok(linked(partial.items))
}

/// Keeps stories that exist and have a URL.
pub fn linked(items: Vec<Option<Story>>) -> Vec<Story> {
    items
        .into_iter()
        .flatten()
        .filter(|story| story.url.as_deref().is_some_and(|u| !u.is_empty()))
        .collect()
}

/// Starts polling Hacker News for [`WidgetId::HackerNews`].
pub fn mount(ctx: &MountContext<'_>) -> RemoteWidget<Vec<Story>> {
    let client = ctx.client();
    let handle = ctx.supervisor.mount(
        WidgetId::HackerNews,
        move || fetch_stories(&client),
        ctx.options(WidgetId::HackerNews),
    );
    RemoteWidget::new(handle, render)
}

/// Title line plus a dim `domain  ▲score  age` line per story.
#[allow(clippy::ptr_arg)]
pub fn render(stories: &Vec<Story>, width: u16, now: DateTime<Local>) -> Vec<Line<'static>> {
    if stories.is_empty() {
        return vec![Line::styled("No stories", Style::default().fg(Color::DarkGray))];
    }
    let now = now.with_timezone(&Utc);
    let title_width = usize::from(width.saturating_sub(2)).max(8);
    stories
        .iter()
        .flat_map(|story| {
            [
                Line::raw(truncate(&story.title, title_width)),
                Line::from(Span::styled(
                    format!(
                        "  {}  ▲{}  {}",
                        story.domain(),
                        story.score,
                        time_ago(story.age_secs(now))
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        })
        .collect()
}
