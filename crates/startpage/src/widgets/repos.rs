//! GitHub repository lists: this week's trending repos and the top
//! bioinformatics projects.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use startpage_feeds::{github, Repository};

use super::format::{compact_count, truncate};
use super::{MountContext, RemoteWidget};
use crate::refresh::FetchError;
use crate::registry::WidgetId;

/// Starts polling repos created in the last week for
/// [`WidgetId::GithubTrending`].
pub fn mount_trending(ctx: &MountContext<'_>) -> RemoteWidget<Vec<Repository>> {
    let client = ctx.client();
    let handle = ctx.supervisor.mount(
        WidgetId::GithubTrending,
        move || {
            let query = github::trending_query(Utc::now().date_naive());
            github::search_repositories(&client, &query).map_err(FetchError::from)
        },
        ctx.options(WidgetId::GithubTrending),
    );
    RemoteWidget::new(handle, render)
}

/// Starts polling bioinformatics repos for [`WidgetId::BioinfoRepos`].
pub fn mount_bioinfo(ctx: &MountContext<'_>) -> RemoteWidget<Vec<Repository>> {
    let client = ctx.client();
    let handle = ctx.supervisor.mount(
        WidgetId::BioinfoRepos,
        move || {
            github::search_repositories(&client, github::BIOINFO_QUERY).map_err(FetchError::from)
        },
        ctx.options(WidgetId::BioinfoRepos),
    );
    RemoteWidget::new(handle, render)
}

/// `owner/name` line plus a dim `★ stars  language` line per repo.
#[allow(clippy::ptr_arg)]
pub fn render(repos: &Vec<Repository>, width: u16, _now: DateTime<Local>) -> Vec<Line<'static>> {
    if repos.is_empty() {
        return vec![Line::styled("No repositories", Style::default().fg(Color::DarkGray))];
    }
    let name_width = usize::from(width.saturating_sub(2)).max(8);
    repos
        .iter()
        .flat_map(|repo| {
            [
                Line::from(Span::styled(
                    truncate(&format!("{}/{}", repo.owner, repo.name), name_width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("  ★ {}", compact_count(repo.stars)),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(
                        format!("  {}", repo.language),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(owner: &str, name: &str, stars: u64) -> Repository {
        Repository {
            name: name.to_string(),
            owner: owner.to_string(),
            description: "No description".to_string(),
            url: format!("https://github.com/{owner}/{name}"),
            stars,
            forks: 1,
            language: "Rust".to_string(),
        }
    }

    #[test]
    fn test_render_name_and_stats() {
        let lines = render(&vec![repo("samtools", "htslib", 1_840)], 40, Local::now());
        assert_eq!(lines[0].to_string(), "samtools/htslib");
        assert_eq!(lines[1].to_string(), "  ★ 1.8k  Rust");
    }

    #[test]
    fn test_render_small_star_counts_verbatim() {
        let lines = render(&vec![repo("a", "b", 12)], 40, Local::now());
        assert_eq!(lines[1].to_string(), "  ★ 12  Rust");
    }

    #[test]
    fn test_render_empty() {
        let lines = render(&Vec::new(), 40, Local::now());
        assert_eq!(lines[0].to_string(), "No repositories");
    }
}
