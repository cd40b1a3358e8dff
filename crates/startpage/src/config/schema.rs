//! TOML configuration schema types for startpage.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of keys is a valid file.
//!
//! Duration fields use human-readable strings (e.g. `"10m"`, `"250ms"`)
//! parsed by the `humantime` crate at the call site.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use startpage_feeds::finnhub;
use tracing::warn;

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::registry::{Registry, WidgetId};

/// Env var overriding `sources.finnhub_api_key`.
pub const FINNHUB_KEY_ENV: &str = "STARTPAGE_FINNHUB_KEY";
/// Env var overriding `sources.openweather_api_key`.
pub const OPENWEATHER_KEY_ENV: &str = "STARTPAGE_OPENWEATHER_KEY";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [tui]
/// [layout]
/// [refresh]
/// [sources]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal UI behavior.
    pub tui: TuiConfig,
    /// Layout persistence.
    pub layout: LayoutConfig,
    /// Per-widget refresh tuning.
    pub refresh: RefreshConfig,
    /// Upstream data source settings.
    pub sources: SourcesConfig,
    /// Logging.
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// `[tui]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Show last good data, labelled stale, when any widget's refresh fails.
    pub show_stale: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            show_stale: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// `[layout]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Path of the persisted layout file. Empty means `<data dir>/layout.json`.
    pub state_file: String,
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

/// `[refresh]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Widget ids that keep showing stale data after a failed refresh.
    pub show_stale_widgets: Vec<String>,
    /// Interval overrides keyed by widget id, e.g. `crypto = "30s"`.
    pub intervals: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// `[sources]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    /// Finnhub token for the stock widgets.
    pub finnhub_api_key: String,
    /// OpenWeather key for the weather widget.
    pub openweather_api_key: String,
    /// Weather location latitude.
    pub latitude: f64,
    /// Weather location longitude.
    pub longitude: f64,
    /// Per-request HTTP timeout.
    pub request_timeout: String,
    /// Symbols shown by the tech stocks widget.
    pub tech_symbols: Vec<String>,
    /// Universe scanned by the movers widget.
    pub mover_symbols: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: String::new(),
            openweather_api_key: String::new(),
            latitude: 52.52,
            longitude: 13.405,
            request_timeout: "10s".to_string(),
            tech_symbols: finnhub::TECH_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            mover_symbols: finnhub::MOVER_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SourcesConfig {
    /// Finnhub key, preferring `STARTPAGE_FINNHUB_KEY` when set.
    pub fn finnhub_key(&self) -> Option<String> {
        resolve_key(FINNHUB_KEY_ENV, &self.finnhub_api_key)
    }

    /// OpenWeather key, preferring `STARTPAGE_OPENWEATHER_KEY` when set.
    pub fn openweather_key(&self) -> Option<String> {
        resolve_key(OPENWEATHER_KEY_ENV, &self.openweather_api_key)
    }

    /// Parsed `request_timeout`.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("sources.request_timeout", &self.request_timeout)
    }
}

fn resolve_key(env: &str, configured: &str) -> Option<String> {
    std::env::var(env)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| Some(configured.trim().to_string()).filter(|v| !v.is_empty()))
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `STARTPAGE_LOG` is unset.
    pub level: LogLevel,
    /// Log file path. Empty means the data dir log for the TUI and stderr
    /// for CLI commands.
    pub file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution against the registry
// ---------------------------------------------------------------------------

/// Parses a humantime duration, naming `field` on failure.
pub fn parse_duration(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let parsed = humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })?;
    if parsed.is_zero() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}

impl Config {
    /// Parsed `tui.tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tui.tick_rate)
    }

    /// Resolved layout file: `layout.state_file` if set, else the data dir
    /// default.
    pub fn layout_path(&self) -> PathBuf {
        match self.layout.state_file.trim() {
            "" => xdg::layout_path(),
            path => xdg::expand_tilde(path),
        }
    }

    /// Configured log file, if any.
    pub fn log_file(&self) -> Option<PathBuf> {
        match self.log.file.trim() {
            "" => None,
            path => Some(xdg::expand_tilde(path)),
        }
    }

    /// Refresh interval for `id`: the override if present and valid, else
    /// the registry default. Invalid overrides are logged and ignored.
    pub fn interval_for(&self, registry: &Registry, id: WidgetId) -> Duration {
        let default = registry
            .get(id)
            .map(|d| d.default_interval)
            .unwrap_or(Duration::from_secs(60));
        let Some(raw) = self.refresh.intervals.get(id.as_str()) else {
            return default;
        };
        match parse_duration(&format!("refresh.intervals.{id}"), raw) {
            Ok(interval) => interval,
            Err(e) => {
                warn!(error = %e, widget = %id, "ignoring interval override");
                default
            }
        }
    }

    /// Whether `id` keeps stale data visible after a failure.
    pub fn show_stale_for(&self, id: WidgetId) -> bool {
        self.tui.show_stale
            || self
                .refresh
                .show_stale_widgets
                .iter()
                .any(|entry| entry == id.as_str())
    }

    /// Checks every value that is only interpreted lazily.
    ///
    /// Returns warnings for entries that will be ignored (unknown widget
    /// ids, bad overrides) and errors for values the app cannot start with.
    pub fn validate(&self, registry: &Registry) -> Result<Vec<String>, ConfigError> {
        self.tick_rate()?;
        self.sources.request_timeout()?;

        let mut warnings = Vec::new();
        for (key, raw) in &self.refresh.intervals {
            if registry.resolve(key).is_none() {
                warnings.push(format!("refresh.intervals: unknown widget id '{key}'"));
            } else if let Err(e) = parse_duration(&format!("refresh.intervals.{key}"), raw) {
                warnings.push(e.to_string());
            }
        }
        for entry in &self.refresh.show_stale_widgets {
            if registry.resolve(entry).is_none() {
                warnings.push(format!(
                    "refresh.show_stale_widgets: unknown widget id '{entry}'"
                ));
            }
        }
        for warning in &warnings {
            warn!("{warning}");
        }
        Ok(warnings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
