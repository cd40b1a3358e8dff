//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `STARTPAGE_LOG` environment variable, falling back to the configured
//! level when it is unset or invalid.
//!
//! ```bash
//! STARTPAGE_LOG=debug startpage
//! STARTPAGE_LOG=startpage::refresh=debug,warn startpage
//! ```
//!
//! The dashboard owns the terminal, so while it runs logs go to a file.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Env var holding `EnvFilter` directives.
pub const LOG_ENV: &str = "STARTPAGE_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for one-shot CLI commands.
    Stderr,
    /// Append to a file, without ANSI colors.
    File(PathBuf),
}

/// Builds the filter from `STARTPAGE_LOG` or `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_filter()))
}

/// Initialize the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed. A log file that
/// cannot be opened falls back to stderr with a note.
pub fn init(target: LogTarget, level: LogLevel) {
    let builder = fmt().with_env_filter(filter(level)).with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            Err(e) => {
                eprintln!("startpage: cannot open log file {}: {e}", path.display());
                builder.with_writer(std::io::stderr).try_init()
            }
        },
    };
    // Already initialized (tests, repeated calls) is fine.
    let _ = result;
}

fn open_log_file(path: &std::path::Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
