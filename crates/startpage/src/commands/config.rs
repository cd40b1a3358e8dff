//! `startpage config` subcommands.

use std::path::Path;
use std::process::ExitCode;

use startpage::config::{default, xdg, ConfigError, ConfigLoader};
use startpage::registry::Registry;

use crate::ConfigAction;

/// Runs a `config` action against `path`, or the default config location.
pub(crate) fn run_config_command(action: ConfigAction, path: Option<&Path>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => init(path, force),
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => validate(path),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init(path: Option<&Path>, force: bool) -> Result<(), ConfigError> {
    let written = default::create_default_config(path, force)?;
    println!("Created configuration at {}", written.display());
    Ok(())
}

fn validate(path: Option<&Path>) -> Result<(), ConfigError> {
    let config = ConfigLoader::load(path)?;
    let warnings = config.validate(&Registry::builtin())?;
    for warning in &warnings {
        println!("warning: {warning}");
    }
    println!("Configuration is valid");
    Ok(())
}
