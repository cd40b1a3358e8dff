//! Platform-aware path resolution for startpage.
//!
//! - Config: `$XDG_CONFIG_HOME/startpage`, else the platform config dir
//!   (`~/.config` on Linux, `~/Library/Application Support` on macOS).
//! - Data (layout state, TUI log): `$XDG_DATA_HOME/startpage`, else the
//!   platform data dir.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "startpage";

/// Returns the configuration directory.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".config")
    }
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding persisted layout and logs.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    dirs::data_dir()
        .unwrap_or_else(|| home().join(".local/share"))
        .join(APP_NAME)
}

/// Default location of the persisted layout (`data_dir()/layout.json`).
pub fn layout_path() -> PathBuf {
    data_dir().join("layout.json")
}

/// Default TUI log file (`data_dir()/startpage.log`).
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{APP_NAME}.log"))
}

/// Home directory, or the current directory when it cannot be determined.
fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expands a leading `~` in a path string to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parents with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
