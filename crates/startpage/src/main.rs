//! Startpage - CLI entry point
//!
//! Launches the dashboard by default. The `layout` subcommands read and
//! edit the persisted layout from scripts, and `config` manages the
//! configuration file.

mod commands;

use clap::{Parser, Subcommand};
use startpage::config::schema::LogLevel;
use startpage::config::{Config, ConfigLoader};
use startpage::logging::{self, LogTarget};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Terminal start page
#[derive(Parser)]
#[command(name = "startpage")]
#[command(version, about = "Terminal start-page dashboard")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/startpage/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Layout state file (overrides `layout.state_file`)
    #[arg(long, global = true, value_name = "PATH")]
    layout_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the startpage CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the dashboard (default)
    Tui,

    /// Inspect or edit the widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// List available widgets with their refresh intervals
    Widgets,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the widget order and which widgets are shown
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Drop one widget onto another's position
    Move {
        /// Widget to move
        dragged: String,
        /// Widget whose position it takes
        target: String,
    },
    /// Show a widget
    Enable {
        /// Widget id
        id: String,
    },
    /// Hide a widget
    Disable {
        /// Widget id
        id: String,
    },
    /// Restore the default order with every widget shown
    Reset,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Tui) {
        // Config commands must work even when the file is broken.
        Commands::Config { action } => {
            logging::init(LogTarget::Stderr, LogLevel::default());
            commands::run_config_command(action, cli.config.as_deref())
        }
        Commands::Tui => match load_config(cli.config.as_deref()) {
            Some(config) => {
                let layout_path = layout_path(cli.layout_file, &config);
                commands::run_tui(config, &layout_path)
            }
            None => ExitCode::FAILURE,
        },
        Commands::Layout { action } => match load_config(cli.config.as_deref()) {
            Some(config) => {
                logging::init(LogTarget::Stderr, config.log.level);
                commands::run_layout_command(action, &layout_path(cli.layout_file, &config))
            }
            None => ExitCode::FAILURE,
        },
        Commands::Widgets => match load_config(cli.config.as_deref()) {
            Some(config) => commands::run_widgets_command(&config),
            None => ExitCode::FAILURE,
        },
    }
}

/// Loads `--config` or the default file, reporting errors on stderr.
fn load_config(path: Option<&Path>) -> Option<Config> {
    ConfigLoader::load(path)
        .map_err(|e| eprintln!("Config error: {e}"))
        .ok()
}

/// `--layout-file` wins over the configured state file.
fn layout_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| config.layout_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use startpage::config::schema::LayoutConfig;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["startpage"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "startpage",
            "layout",
            "show",
            "--layout-file",
            "/tmp/layout.json",
            "--config",
            "/tmp/config.toml",
        ])
        .unwrap();
        assert_eq!(cli.layout_file, Some(PathBuf::from("/tmp/layout.json")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        match cli.command {
            Some(Commands::Layout {
                action: LayoutAction::Show { json },
            }) => assert!(!json),
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_layout_move_takes_two_ids() {
        let cli = Cli::try_parse_from(["startpage", "layout", "move", "clock", "crypto"]).unwrap();
        match cli.command {
            Some(Commands::Layout {
                action: LayoutAction::Move { dragged, target },
            }) => {
                assert_eq!(dragged, "clock");
                assert_eq!(target, "crypto");
            }
            _ => panic!("unexpected command variant"),
        }

        assert!(Cli::try_parse_from(["startpage", "layout", "move", "clock"]).is_err());
    }

    #[test]
    fn test_layout_without_action_fails() {
        assert!(Cli::try_parse_from(["startpage", "layout"]).is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["startpage", "config", "init", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_layout_flag_beats_config() {
        let config = Config {
            layout: LayoutConfig {
                state_file: "/from/config.json".to_string(),
            },
            ..Config::default()
        };

        assert_eq!(
            layout_path(Some(PathBuf::from("/from/flag.json")), &config),
            PathBuf::from("/from/flag.json")
        );
        assert_eq!(
            layout_path(None, &config),
            PathBuf::from("/from/config.json")
        );
    }
}
