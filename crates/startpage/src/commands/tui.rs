//! `startpage tui`: the dashboard itself.

use std::future::Future;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use startpage::config::{xdg, Config, ConfigError};
use startpage::logging::{self, LogTarget};
use startpage::registry::Registry;
use startpage::tui::app::App;
use tokio::runtime::Runtime;

use super::open_layout;

/// How long quitting waits for fetches still running on the blocking pool.
/// Their results are discarded anyway, so the process does not wait out
/// the request timeout.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Runs the dashboard until the user quits.
///
/// The dashboard owns the terminal, so logs go to the configured file or
/// the data dir log.
pub(crate) fn run_tui(config: Config, layout_path: &Path) -> ExitCode {
    let log_path = config.log_file().unwrap_or_else(xdg::log_path);
    logging::init(LogTarget::File(log_path), config.log.level);

    let tick_rate = match startup_tick_rate(&config) {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(layout = %layout_path.display(), "starting dashboard");
    let layout = open_layout(layout_path);
    let result = run_then_shutdown(rt, async {
        let mut app = App::new(layout, config);
        app.run(tick_rate).await
    });
    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Validates `config` and returns the tick rate. Entries that will be
/// ignored (unknown widget ids, bad overrides) are logged as warnings.
fn startup_tick_rate(config: &Config) -> Result<Duration, ConfigError> {
    config.validate(&Registry::builtin())?;
    config.tick_rate()
}

/// Drives `future` to completion, then shuts `rt` down without waiting
/// more than [`SHUTDOWN_GRACE`] for blocking fetches.
fn run_then_shutdown<F: Future>(rt: Runtime, future: F) -> F::Output {
    let output = rt.block_on(future);
    rt.shutdown_timeout(SHUTDOWN_GRACE);
    output
}
