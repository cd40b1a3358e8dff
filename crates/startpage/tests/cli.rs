//! Integration tests for the `startpage` layout, widgets and config
//! subcommands.
//!
//! Each test runs the real binary against a layout file and XDG dirs inside
//! its own temp dir, so nothing touches the user's files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const STARTPAGE_BIN: &str = env!("CARGO_BIN_EXE_startpage");

/// A temp dir acting as home for config, data and the layout file.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn layout_file(&self) -> PathBuf {
        self.dir.path().join("layout.json")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config").join("startpage").join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(STARTPAGE_BIN);
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("STARTPAGE_LOG")
            .env_remove("STARTPAGE_FINNHUB_KEY")
            .env_remove("STARTPAGE_OPENWEATHER_KEY");
        cmd
    }

    /// `startpage --layout-file <sandbox>/layout.json layout <args>`
    fn layout(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd()
            .arg("--layout-file")
            .arg(self.layout_file())
            .arg("layout")
            .args(args)
            .assert()
    }

    fn order(&self) -> Vec<String> {
        let output = self.layout(&["show", "--json"]).success();
        let value: serde_json::Value =
            serde_json::from_slice(&output.get_output().stdout).expect("json output");
        value["order"]
            .as_array()
            .expect("order array")
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    fn visible(&self) -> Vec<String> {
        let output = self.layout(&["show", "--json"]).success();
        let value: serde_json::Value =
            serde_json::from_slice(&output.get_output().stdout).expect("json output");
        value["visible"]
            .as_array()
            .expect("visible array")
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

#[test]
fn test_show_fresh_layout_is_registry_order() {
    let sandbox = Sandbox::new();

    sandbox
        .layout(&["show"])
        .success()
        .stdout(predicate::str::starts_with(" 1. clock"))
        .stdout(predicate::str::contains("10. biotechNews"));

    assert_eq!(sandbox.order().len(), 10);
    assert!(
        !sandbox.layout_file().exists(),
        "showing must not write the store"
    );
}

#[test]
fn test_move_persists_across_invocations() {
    let sandbox = Sandbox::new();

    sandbox
        .layout(&["move", "clock", "crypto"])
        .success()
        .stdout(predicate::str::contains("Moved clock to crypto"));

    assert_eq!(&sandbox.order()[..3], &["weather", "crypto", "clock"]);

    let saved = fs::read_to_string(sandbox.layout_file()).expect("layout file written");
    assert!(saved.contains("dashboard-layout"));
}

#[test]
fn test_move_backward_lands_before_target() {
    let sandbox = Sandbox::new();

    sandbox.layout(&["move", "techStocks", "clock"]).success();

    assert_eq!(
        &sandbox.order()[..4],
        &["techStocks", "clock", "weather", "crypto"]
    );
}

#[test]
fn test_disable_enable_keeps_position() {
    let sandbox = Sandbox::new();

    sandbox
        .layout(&["disable", "weather"])
        .success()
        .stdout(predicate::str::contains("weather hidden"));
    assert!(!sandbox.visible().contains(&"weather".to_string()));
    assert_eq!(sandbox.order()[1], "weather");

    sandbox
        .layout(&["disable", "weather"])
        .success()
        .stdout(predicate::str::contains("already hidden"));

    sandbox.layout(&["enable", "weather"]).success();
    assert_eq!(sandbox.visible()[1], "weather");
}

#[test]
fn test_reset_restores_defaults() {
    let sandbox = Sandbox::new();
    sandbox.layout(&["move", "clock", "biotechNews"]).success();
    sandbox.layout(&["disable", "crypto"]).success();

    sandbox
        .layout(&["reset"])
        .success()
        .stdout(predicate::str::contains("Layout reset"));

    assert_eq!(sandbox.order()[0], "clock");
    assert_eq!(sandbox.visible().len(), 10);
}

#[test]
fn test_unknown_widget_id_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .layout(&["enable", "stockTicker"])
        .code(1)
        .stderr(predicate::str::contains("unknown widget id 'stockTicker'"));
    sandbox.layout(&["move", "clock", "nope"]).code(1);

    assert!(!sandbox.layout_file().exists());
}

#[test]
fn test_corrupt_layout_file_falls_back_to_defaults() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.layout_file(), "{not json").expect("write layout");

    assert_eq!(sandbox.order()[0], "clock");
    assert_eq!(sandbox.visible().len(), 10);
}

#[test]
fn test_widgets_lists_registry_with_intervals() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("widgets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crypto Prices"))
        .stdout(predicate::str::contains("every 10m"));
}

#[test]
fn test_widgets_honors_interval_override() {
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("custom.toml");
    fs::write(&config, "[refresh.intervals]\nclock = \"5s\"\n").expect("write config");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("widgets")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"clock\s+Clock\s+every 5s").expect("regex"));
}

#[test]
fn test_config_init_then_validate() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration"));
    assert!(sandbox.config_file().exists());

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));

    sandbox
        .cmd()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_path_follows_xdg() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.config_file().to_string_lossy().to_string(),
        ));
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("broken.toml");
    fs::write(&config, "[tui]\ntick_rate = \n").expect("write config");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["layout", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
