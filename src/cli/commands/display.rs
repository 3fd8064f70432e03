//! Shared rendering and action flow for the installer commands.
//!
//! Every command ends by showing the freshly reconciled state, so the
//! helpers here are used by `status`, `install`, `uninstall`, `update`
//! and `next`.

use crate::actions::ActionReport;
use crate::controller::{Cycle, Message};
use crate::error::{InstallerError, Result};
use crate::presenter::{action_label, StatusView};
use crate::reconcile::{Action, InstallationState};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{CommandResult, InstallerContext, EXIT_ACTION_FAILED, EXIT_STATUS_UNKNOWN};

/// Render a reconciled state.
pub fn show_state(ui: &mut dyn UserInterface, state: &InstallationState, name: &str) {
    let view = StatusView::from_state(state, name);
    ui.show_header(&view.title);
    ui.show_versions(&view.versions);

    for (i, line) in view.status.iter().enumerate() {
        match (i, state.backend_installed) {
            (0, true) if state.dependency_installed() => ui.success(line),
            (0, true) => ui.error(line),
            (_, true) => ui.warning(line),
            (_, false) => ui.message(line),
        }
    }
    ui.message(&view.remote_status);

    if view.primary.enabled {
        ui.show_hint(&format!("Next: {} (pyvol-installer next)", view.primary.label));
    }
    if view.secondary.enabled {
        ui.show_hint(&format!("Also possible: {}", view.secondary.label));
    }
}

/// Render a state that could not be determined.
pub fn show_unknown(ui: &mut dyn UserInterface, error: &InstallerError, name: &str) {
    let view = StatusView::unknown(error, name);
    ui.show_header(&view.title);
    for line in &view.status {
        ui.error(line);
    }
    if let Some(output) = error.captured_output() {
        ui.show_hint(output.trim());
    }
}

/// Render the notices of a completed action.
pub fn show_report(ui: &mut dyn UserInterface, report: &ActionReport) {
    for notice in &report.notices {
        if notice.is_warning() {
            ui.warning(&notice.to_string());
        } else {
            ui.message(&notice.to_string());
        }
    }
}

/// Render a failed action; package manager output goes into an error block.
pub fn show_action_error(ui: &mut dyn UserInterface, error: &InstallerError) {
    match error {
        InstallerError::ActionFailure {
            action,
            command,
            output,
            ..
        } => {
            ui.error(&format!("{} failed", action));
            ui.show_command_failure(command, output, Some(hint_for(output)));
        }
        other => ui.error(&other.to_string()),
    }
}

fn hint_for(output: &str) -> &'static str {
    let lower = output.to_lowercase();
    if lower.contains("permission denied") {
        "The interpreter's environment is not writable; re-run with --python pointing at a writable environment"
    } else if lower.contains("no matching distribution") || lower.contains("connection") {
        "The package index could not be reached; a cached archive can be installed with `install --from-cache`"
    } else {
        "Re-run with --debug for the full command log"
    }
}

/// Ask before removing the backend. `assume_yes` skips the prompt.
///
/// Without a terminal the prompt answers from `PYVOL_PROMPT_UNINSTALL`
/// and otherwise declines.
pub fn confirm_uninstall(
    ui: &mut dyn UserInterface,
    name: &str,
    assume_yes: bool,
) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let prompt = Prompt::confirm(
        "uninstall",
        format!("Uninstall {}? The plugin itself stays registered.", name),
        false,
    );
    let confirmed = ui.confirm(&prompt)?;
    if !confirmed {
        if ui.is_interactive() {
            ui.message("Uninstall cancelled.");
        } else {
            ui.error("Refusing to uninstall without confirmation; pass --yes.");
        }
    }
    Ok(confirmed)
}

/// Render the snapshot a cycle ended with and pick the exit code.
pub fn finish_cycle(
    ui: &mut dyn UserInterface,
    snapshot: &Result<InstallationState>,
    name: &str,
    action_ok: bool,
) -> CommandResult {
    match snapshot {
        Ok(state) => {
            show_state(ui, state, name);
            if action_ok {
                CommandResult::success()
            } else {
                CommandResult::failure(EXIT_ACTION_FAILED)
            }
        }
        Err(e) => {
            show_unknown(ui, e, name);
            CommandResult::failure(EXIT_STATUS_UNKNOWN)
        }
    }
}

/// Dispatch a message with a spinner, then render the action and state.
pub fn run_action(
    ui: &mut dyn UserInterface,
    context: &InstallerContext,
    action: Action,
) -> Result<CommandResult> {
    let cycle = dispatch_with_spinner(ui, context, action)?;
    let action_ok = report_outcome(ui, &cycle);
    Ok(finish_cycle(ui, &cycle.snapshot, context.display_name(), action_ok))
}

/// Dispatch a message while a spinner runs; the outcome is not rendered.
pub fn dispatch_with_spinner(
    ui: &mut dyn UserInterface,
    context: &InstallerContext,
    action: Action,
) -> Result<Cycle> {
    let label = action_label(action, context.display_name());
    let mut spinner = ui.start_spinner(&format!("{}...", label));
    let cycle = context.controller().dispatch(Message::from(action))?;

    match &cycle.action {
        Some(Err(_)) => spinner.finish_error(&format!("{} failed", label)),
        _ => spinner.finish_success(&label),
    }
    Ok(cycle)
}

/// Render the action part of a cycle. Returns whether it succeeded.
pub fn report_outcome(ui: &mut dyn UserInterface, cycle: &Cycle) -> bool {
    match &cycle.action {
        Some(Ok(report)) => {
            show_report(ui, report);
            true
        }
        Some(Err(e)) => {
            show_action_error(ui, e);
            false
        }
        None => true,
    }
}
