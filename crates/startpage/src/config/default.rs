//! Default configuration template and file creation.
//!
//! The template is a commented TOML file whose values match
//! `Config::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# startpage configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/startpage/config.toml

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# How often the dashboard redraws when nothing else happens.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# Keep showing the last good data, marked "stale", when a widget fails to
# refresh. When false a failure replaces the data with the error message.
show_stale = false

# ==============================================================================
# Layout
# ==============================================================================

[layout]

# File holding widget order and visibility.
# Empty means $XDG_DATA_HOME/startpage/layout.json.
state_file = ""

# ==============================================================================
# Refresh
# ==============================================================================

[refresh]

# Widgets that keep stale data visible on failure even when
# tui.show_stale is false. Example: ["crypto", "techStocks"]
show_stale_widgets = []

# Per-widget refresh intervals, keyed by widget id.
# Run `startpage widgets` for ids and built-in intervals.
[refresh.intervals]
# crypto = "30s"
# hackerNews = "10m"

# ==============================================================================
# Sources
# ==============================================================================

[sources]

# Finnhub token for "Tech Stocks" and "Today's Movers".
# STARTPAGE_FINNHUB_KEY takes precedence when set.
finnhub_api_key = ""

# OpenWeather key for "Weather".
# STARTPAGE_OPENWEATHER_KEY takes precedence when set.
openweather_api_key = ""

# Weather location.
latitude = 52.52
longitude = 13.405

# Timeout for each upstream HTTP request.
request_timeout = "10s"

# Symbols shown by "Tech Stocks".
tech_symbols = ["AAPL", "GOOGL", "MSFT", "NVDA", "TSLA"]

# Symbols scanned by "Today's Movers".
mover_symbols = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK.B", "UNH",
    "JNJ", "V", "WMT", "XOM", "JPM", "PG", "MA", "HD", "CVX", "LLY", "ABBV",
    "AVGO", "KO", "MRK", "PEP", "COST", "TMO", "BAC",
]

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Options: "error", "warn", "info", "debug", "trace"
# STARTPAGE_LOG overrides this with a full filter directive.
level = "info"

# Log file. Empty means $XDG_DATA_HOME/startpage/startpage.log while the
# dashboard is running and stderr for other commands.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Writes the template to `path`, or the default config path when `None`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
///
/// Returns the path written.
pub fn create_default_config(path: Option<&Path>, force: bool) -> Result<PathBuf, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!(backup = %backup_path.display(), "backed up existing config");
    }

    write_default_config(&path)?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(path)
}

/// Writes the template to `path`, creating parent dirs and setting 0600
/// permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use serial_test::serial;

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for header in [
            "[tui]",
            "[layout]",
            "[refresh]",
            "[refresh.intervals]",
            "[sources]",
            "[log]",
        ] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(header),
                "missing {header} section"
            );
        }
    }

    #[test]
    fn template_is_heavily_commented() {
        let comment_lines = DEFAULT_CONFIG_TEMPLATE
            .lines()
            .filter(|l| l.trim_start().starts_with('#'))
            .count();
        assert!(
            comment_lines > 20,
            "expected >20 comment lines, got {comment_lines}"
        );
    }

    // -- create_default_config ----------------------------------------------

    #[test]
    fn create_writes_template_to_explicit_path() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let target = tmp.path().join("nested/config.toml");
        let path = create_default_config(Some(&target), false).expect("should succeed");
        assert_eq!(path, target);
        let content = fs::read_to_string(&target).expect("should read");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn create_without_force_returns_already_exists() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let target = tmp.path().join("config.toml");
        create_default_config(Some(&target), false).expect("first call should succeed");
        match create_default_config(Some(&target), false).expect_err("should fail") {
            ConfigError::AlreadyExists { path } => assert_eq!(path, target),
            other => panic!("expected AlreadyExists, got: {other:?}"),
        }
    }

    #[test]
    fn create_with_force_creates_backup() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let target = tmp.path().join("config.toml");
        fs::write(&target, "# custom content\n").expect("seed file");

        create_default_config(Some(&target), true).expect("force should succeed");

        let backup = target.with_extension("toml.backup");
        assert_eq!(
            fs::read_to_string(&backup).expect("read backup"),
            "# custom content\n"
        );
        assert_eq!(
            fs::read_to_string(&target).expect("read new"),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[test]
    #[serial]
    fn create_defaults_to_xdg_location() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", tmp.path());

        let result = create_default_config(None, false);

        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        assert_eq!(
            result.expect("should succeed"),
            tmp.path().join("startpage/config.toml")
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let target = tmp.path().join("config.toml");
        create_default_config(Some(&target), false).expect("should succeed");
        let mode = fs::metadata(&target)
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600, "file should be owner-only read/write");
    }
}
