//! Install command implementation.
//!
//! `pyvol-installer install` installs the backend from the package index,
//! or with `--from-cache` from the archive in the cache directory.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::reconcile::Action;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, InstallerContext};
use super::display;

/// The install command implementation.
pub struct InstallCommand<'a> {
    context: &'a InstallerContext,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(context: &'a InstallerContext, args: InstallArgs) -> Self {
        Self { context, args }
    }

    /// The action this invocation requests.
    pub fn action(&self) -> Action {
        if self.args.from_cache {
            Action::InstallFromCache
        } else {
            Action::InstallFromRemote
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        display::run_action(ui, self.context, self.action())
    }
}
