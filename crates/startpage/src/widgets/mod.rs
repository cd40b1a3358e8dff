//! Dashboard widgets.
//!
//! Every entry in the [`Registry`](crate::registry::Registry) has exactly one
//! widget here, created through [`mount`]. Apart from the clock, widgets own
//! a [`SupervisorHandle`](crate::refresh::SupervisorHandle) whose refresh
//! task runs for as long as the widget is mounted; dropping the widget
//! cancels it.
//!
//! Widgets render into plain ratatui [`Line`]s. The grid view wraps and
//! clips them to the cell.

pub mod clock;
pub mod crypto;
pub mod format;
pub mod hackernews;
pub mod news;
pub mod quote;
pub mod remote;
pub mod repos;
pub mod stocks;
pub mod weather;

pub use remote::RemoteWidget;

use chrono::{DateTime, Local};
use ratatui::text::Line;
use startpage_feeds::{client::DEFAULT_TIMEOUT, FeedClient};
use tracing::warn;

use crate::config::Config;
use crate::refresh::{RefreshOptions, RefreshSupervisor};
use crate::registry::{Registry, WidgetId};

/// A mounted dashboard widget.
pub trait Widget: Send {
    /// Registry id of this widget.
    fn id(&self) -> WidgetId;

    /// Renders the widget body for a cell `width` columns wide.
    fn render(&self, width: u16, now: DateTime<Local>) -> Vec<Line<'static>>;

    /// Asks for an immediate refresh. Returns `false` if nothing was
    /// started (no refresh task, or one already in flight).
    fn refresh_now(&self) -> bool {
        false
    }

    /// Whether a refresh is currently running.
    fn is_refreshing(&self) -> bool {
        false
    }

    /// Widget-specific key. Returns `true` if the key was consumed.
    fn handle_key(&mut self, _key: char) -> bool {
        false
    }

    /// Short key hint shown in the cell title when selected.
    fn key_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Everything a widget needs to start its refresh task.
pub struct MountContext<'a> {
    /// Spawns refresh tasks.
    pub supervisor: &'a RefreshSupervisor,
    /// Loaded configuration.
    pub config: &'a Config,
    /// Widget registry, for default intervals.
    pub registry: &'a Registry,
}

impl MountContext<'_> {
    /// Refresh options for `id` after config overrides.
    pub fn options(&self, id: WidgetId) -> RefreshOptions {
        RefreshOptions {
            interval: self.config.interval_for(self.registry, id),
            show_stale: self.config.show_stale_for(id),
        }
    }

    /// HTTP client honoring `sources.request_timeout`.
    pub fn client(&self) -> FeedClient {
        let timeout = self.config.sources.request_timeout().unwrap_or_else(|e| {
            warn!(error = %e, "using default request timeout");
            DEFAULT_TIMEOUT
        });
        FeedClient::new(timeout)
    }
}

/// Creates the widget for `id` and starts its refresh task.
///
/// Must run inside a tokio runtime.
pub fn mount(id: WidgetId, ctx: &MountContext<'_>) -> Box<dyn Widget> {
    match id {
        WidgetId::Clock => Box::new(clock::ClockWidget::new()),
        WidgetId::Weather => Box::new(weather::mount(ctx)),
        WidgetId::Crypto => Box::new(crypto::mount(ctx)),
        WidgetId::TechStocks => Box::new(stocks::mount_tech(ctx)),
        WidgetId::TechQuote => Box::new(quote::mount(ctx)),
        WidgetId::StockMovers => Box::new(stocks::mount_movers(ctx)),
        WidgetId::HackerNews => Box::new(hackernews::mount(ctx)),
        WidgetId::GithubTrending => Box::new(repos::mount_trending(ctx)),
        WidgetId::BioinfoRepos => Box::new(repos::mount_bioinfo(ctx)),
        WidgetId::BiotechNews => Box::new(news::mount(ctx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_mount_returns_matching_widget_for_every_id() {
        let (tx, _rx) = mpsc::channel(64);
        let supervisor = RefreshSupervisor::new(tx);
        let mut config = Config::default();
        // Keep any network attempt short; the widgets are dropped right away.
        config.sources.request_timeout = "1ms".to_string();
        let registry = Registry::builtin();
        let ctx = MountContext {
            supervisor: &supervisor,
            config: &config,
            registry: &registry,
        };

        for id in WidgetId::ALL {
            let widget = mount(id, &ctx);
            assert_eq!(widget.id(), id);
        }
    }

    #[test]
    fn test_options_follow_config_overrides() {
        let (tx, _rx) = mpsc::channel(1);
        let supervisor = RefreshSupervisor::new(tx);
        let mut config = Config::default();
        config
            .refresh
            .intervals
            .insert("weather".to_string(), "1m".to_string());
        config.refresh.show_stale_widgets = vec!["weather".to_string()];
        let registry = Registry::builtin();
        let ctx = MountContext {
            supervisor: &supervisor,
            config: &config,
            registry: &registry,
        };

        let options = ctx.options(WidgetId::Weather);
        assert_eq!(options.interval, std::time::Duration::from_secs(60));
        assert!(options.show_stale);
        assert!(!ctx.options(WidgetId::Crypto).show_stale);
    }

    #[test]
    fn test_client_falls_back_to_default_timeout() {
        let (tx, _rx) = mpsc::channel(1);
        let supervisor = RefreshSupervisor::new(tx);
        let mut config = Config::default();
        config.sources.request_timeout = "later".to_string();
        let registry = Registry::builtin();
        let ctx = MountContext {
            supervisor: &supervisor,
            config: &config,
            registry: &registry,
        };
        assert_eq!(ctx.client().timeout(), DEFAULT_TIMEOUT);
    }
}
