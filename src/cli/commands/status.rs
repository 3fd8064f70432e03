//! Status command implementation.
//!
//! The `pyvol-installer status` command shows the reconciled installation
//! state, optionally after querying the package index.

use crate::cli::args::StatusArgs;
use crate::controller::Message;
use crate::error::{InstallerError, Result};
use crate::reconcile::Action;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, InstallerContext, EXIT_STATUS_UNKNOWN};
use super::display;

/// The status command implementation.
pub struct StatusCommand<'a> {
    context: &'a InstallerContext,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(context: &'a InstallerContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    fn show_json(&self, ui: &mut dyn UserInterface, state: &impl serde::Serialize) -> Result<()> {
        let json =
            serde_json::to_string_pretty(state).map_err(|e| InstallerError::Other(e.into()))?;
        ui.message(&json);
        Ok(())
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let controller = self.context.controller();
        let name = self.context.display_name();

        let cycle = if self.args.check_updates {
            let cycle = display::dispatch_with_spinner(ui, self.context, Action::CheckForUpdates)?;
            // An absent backend has nothing to check; the plain status still applies.
            if let Some(Err(e)) = &cycle.action {
                if !matches!(e, InstallerError::ActionNotAvailable { .. }) {
                    display::show_action_error(ui, e);
                } else {
                    ui.warning(&e.to_string());
                }
            }
            cycle
        } else {
            controller.dispatch(Message::Refresh)?
        };

        if self.args.json {
            return match &cycle.snapshot {
                Ok(state) => {
                    self.show_json(ui, state)?;
                    Ok(CommandResult::success())
                }
                Err(e) => {
                    display::show_unknown(ui, e, name);
                    Ok(CommandResult::failure(EXIT_STATUS_UNKNOWN))
                }
            };
        }

        Ok(display::finish_cycle(ui, &cycle.snapshot, name, true))
    }
}
