//! `startpage layout` subcommands.
//!
//! These edit the same store the dashboard uses, through the same
//! [`LayoutController`], so a layout changed here is what the next TUI
//! session shows.

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;
use startpage::config::Config;
use startpage::layout::{JsonFileBackend, LayoutController, LayoutStore};
use startpage::registry::{Registry, UnknownWidget, WidgetId};

use crate::LayoutAction;

/// Loads the layout stored at `path` against the built-in registry.
pub(crate) fn open_layout(path: &Path) -> LayoutController {
    let store = LayoutStore::new(JsonFileBackend::new(path), Registry::builtin());
    LayoutController::load(store)
}

/// Runs a `layout` action against the store at `path`.
pub(crate) fn run_layout_command(action: LayoutAction, path: &Path) -> ExitCode {
    let mut layout = open_layout(path);
    match apply(&mut layout, action) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the registry with each widget's effective refresh interval.
pub(crate) fn run_widgets_command(config: &Config) -> ExitCode {
    let registry = Registry::builtin();
    for descriptor in registry.descriptors() {
        let interval = config.interval_for(&registry, descriptor.id);
        println!(
            "{:<16} {:<16} every {}",
            descriptor.id.as_str(),
            descriptor.display_name,
            humantime::format_duration(interval)
        );
    }
    ExitCode::SUCCESS
}

/// Applies `action` and returns the text to print.
fn apply(layout: &mut LayoutController, action: LayoutAction) -> Result<String, UnknownWidget> {
    match action {
        LayoutAction::Show { json } => Ok(if json {
            show_json(layout)
        } else {
            show_table(layout)
        }),
        LayoutAction::Move { dragged, target } => {
            let dragged = resolve(layout, &dragged)?;
            let target = resolve(layout, &target)?;
            Ok(if layout.move_widget(dragged, target) {
                format!("Moved {dragged} to {target}")
            } else {
                "Order unchanged".to_string()
            })
        }
        LayoutAction::Enable { id } => toggle(layout, &id, true),
        LayoutAction::Disable { id } => toggle(layout, &id, false),
        LayoutAction::Reset => {
            layout.reset_layout();
            Ok("Layout reset".to_string())
        }
    }
}

fn toggle(
    layout: &mut LayoutController,
    raw: &str,
    enabled: bool,
) -> Result<String, UnknownWidget> {
    let id = resolve(layout, raw)?;
    let changed = layout.toggle(id, enabled);
    let state = if enabled { "shown" } else { "hidden" };
    Ok(match changed {
        true => format!("{id} {state}"),
        false => format!("{id} already {state}"),
    })
}

fn resolve(layout: &LayoutController, raw: &str) -> Result<WidgetId, UnknownWidget> {
    layout
        .registry()
        .resolve(raw)
        .ok_or_else(|| UnknownWidget(raw.to_string()))
}

fn show_table(layout: &LayoutController) -> String {
    layout
        .order()
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let state = if layout.enabled().contains(id) {
                "shown"
            } else {
                "hidden"
            };
            format!(
                "{:>2}. {:<16} {:<16} {state}",
                index + 1,
                id.as_str(),
                layout.registry().display_name(*id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn show_json(layout: &LayoutController) -> String {
    let ids = |ids: Vec<WidgetId>| ids.into_iter().map(WidgetId::as_str).collect::<Vec<_>>();
    json!({
        "order": ids(layout.order().to_vec()),
        "visible": ids(layout.visible()),
    })
    .to_string()
}
