//! Update command implementation.
//!
//! A fresh process has never queried the package index, so `update` first
//! checks for updates and then upgrades only when a newer release exists.
//! A check that could not reach the index exits non-zero, unlike a genuine
//! "up to date".

use crate::cli::args::UpdateArgs;
use crate::error::Result;
use crate::probes::UpdateCheck;
use crate::reconcile::Action;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, InstallerContext};
use super::display;

/// The update command implementation.
pub struct UpdateCommand<'a> {
    context: &'a InstallerContext,
    args: UpdateArgs,
}

impl<'a> UpdateCommand<'a> {
    /// Create a new update command.
    pub fn new(context: &'a InstallerContext, args: UpdateArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &UpdateArgs {
        &self.args
    }
}

impl Command for UpdateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let name = self.context.display_name();
        let check = display::dispatch_with_spinner(ui, self.context, Action::CheckForUpdates)?;
        if !display::report_outcome(ui, &check) {
            return Ok(display::finish_cycle(ui, &check.snapshot, name, false));
        }

        match &check.snapshot {
            Ok(state) if state.update_target().is_some() => {
                display::run_action(ui, self.context, Action::Update)
            }
            Ok(state) if matches!(state.update_check, UpdateCheck::Failed { .. }) => {
                Ok(display::finish_cycle(ui, &check.snapshot, name, false))
            }
            _ => Ok(display::finish_cycle(ui, &check.snapshot, name, true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::EXIT_ACTION_FAILED;
    use crate::config::InstallerConfig;
    use crate::host::NullActivator;
    use crate::shell::{ScriptedResponse, ScriptedRunner};
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context(runner: &Arc<ScriptedRunner>, temp: &TempDir) -> InstallerContext {
        let mut config = InstallerConfig::default();
        config.cache.dir = Some(temp.path().join("cache"));
        InstallerContext::new(&config, runner.clone(), Arc::new(NullActivator)).unwrap()
    }

    #[test]
    fn upgrades_when_newer_release_exists() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "--outdated",
            ScriptedResponse::ok(
                r#"[{"name": "bio-pyvol", "version": "1.0.0", "latest_version": "1.1.0"}]"#,
            ),
        );
        runner.on(
            "pip list --format=json",
            ScriptedResponse::ok(r#"[{"name": "bio-pyvol", "version": "1.0.0"}]"#),
        );

        let mut ui = MockUI::new();
        let result = UpdateCommand::new(&context(&runner, &temp), UpdateArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(runner.was_called("pip install --upgrade bio-pyvol"));
        assert!(ui.has_message("restarted"));
    }

    #[test]
    fn up_to_date_does_not_upgrade() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("--outdated", ScriptedResponse::ok("[]"));
        runner.on(
            "pip list --format=json",
            ScriptedResponse::ok(r#"[{"name": "bio-pyvol", "version": "1.1.0"}]"#),
        );

        let mut ui = MockUI::new();
        let result = UpdateCommand::new(&context(&runner, &temp), UpdateArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(!runner.was_called("--upgrade"));
        assert!(ui.has_message("Local PyVOL is up to date (version 1.1.0)"));
    }

    #[test]
    fn failed_check_is_not_up_to_date() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("--outdated", ScriptedResponse::fail(1, "Connection refused"));
        runner.on(
            "pip list --format=json",
            ScriptedResponse::ok(r#"[{"name": "bio-pyvol", "version": "1.0.0"}]"#),
        );

        let mut ui = MockUI::new();
        let result = UpdateCommand::new(&context(&runner, &temp), UpdateArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, EXIT_ACTION_FAILED);
        assert!(!runner.was_called("--upgrade"));
        assert!(ui.has_message("PyPI could not be queried"));
        assert!(!ui.has_message("up to date"));
    }

    #[test]
    fn not_installed_cannot_update() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("pip list --format=json", ScriptedResponse::ok("[]"));

        let mut ui = MockUI::new();
        let result = UpdateCommand::new(&context(&runner, &temp), UpdateArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("not available"));
    }
}
