//! Next command implementation.
//!
//! `pyvol-installer next` performs whatever the status view offers as the
//! primary action.

use crate::cli::args::NextArgs;
use crate::controller::Message;
use crate::error::Result;
use crate::reconcile::Action;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, InstallerContext, EXIT_ACTION_FAILED};
use super::display;

/// The next command implementation.
pub struct NextCommand<'a> {
    context: &'a InstallerContext,
    args: NextArgs,
}

impl<'a> NextCommand<'a> {
    /// Create a new next command.
    pub fn new(context: &'a InstallerContext, args: NextArgs) -> Self {
        Self { context, args }
    }
}

impl Command for NextCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let name = self.context.display_name();
        let cycle = self.context.controller().dispatch(Message::Refresh)?;
        let state = match &cycle.snapshot {
            Ok(state) => state,
            Err(_) => return Ok(display::finish_cycle(ui, &cycle.snapshot, name, false)),
        };

        let action = state.primary_action.action();
        tracing::debug!("Primary action is {}", action);
        if action == Action::Uninstall && !display::confirm_uninstall(ui, name, self.args.yes)? {
            return Ok(CommandResult::failure(EXIT_ACTION_FAILED));
        }
        display::run_action(ui, self.context, action)
    }
}
