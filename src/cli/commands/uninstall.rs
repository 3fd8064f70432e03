//! Uninstall command implementation.

use crate::cli::args::UninstallArgs;
use crate::error::Result;
use crate::reconcile::Action;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, InstallerContext, EXIT_ACTION_FAILED};
use super::display;

/// The uninstall command implementation.
pub struct UninstallCommand<'a> {
    context: &'a InstallerContext,
    args: UninstallArgs,
}

impl<'a> UninstallCommand<'a> {
    /// Create a new uninstall command.
    pub fn new(context: &'a InstallerContext, args: UninstallArgs) -> Self {
        Self { context, args }
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !display::confirm_uninstall(ui, self.context.display_name(), self.args.yes)? {
            return Ok(CommandResult::failure(EXIT_ACTION_FAILED));
        }
        display::run_action(ui, self.context, Action::Uninstall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallerConfig;
    use crate::host::NullActivator;
    use crate::shell::{ScriptedResponse, ScriptedRunner};
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn installed_runner() -> Arc<ScriptedRunner> {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on_sequence(
            "pip list --format=json",
            vec![
                ScriptedResponse::ok(r#"[{"name": "bio-pyvol", "version": "1.1.0"}]"#),
                ScriptedResponse::ok("[]"),
            ],
        );
        runner
    }

    fn context(runner: &Arc<ScriptedRunner>, temp: &TempDir) -> InstallerContext {
        let mut config = InstallerConfig::default();
        config.cache.dir = Some(temp.path().join("cache"));
        InstallerContext::new(&config, runner.clone(), Arc::new(NullActivator)).unwrap()
    }

    #[test]
    fn refuses_without_confirmation() {
        let temp = TempDir::new().unwrap();
        let runner = installed_runner();

        let mut ui = MockUI::new();
        let result = UninstallCommand::new(&context(&runner, &temp), UninstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, EXIT_ACTION_FAILED);
        assert_eq!(ui.prompts_shown(), ["uninstall"]);
        assert!(!runner.was_called("pip uninstall"));
    }

    #[test]
    fn confirmed_prompt_uninstalls() {
        let temp = TempDir::new().unwrap();
        let runner = installed_runner();

        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.set_prompt_response("uninstall", "yes");
        let result = UninstallCommand::new(&context(&runner, &temp), UninstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(runner.was_called("pip uninstall -y bio-pyvol"));
        assert!(ui.has_message("plugin itself must also be removed"));
        assert!(ui.has_message("PyVOL is not currently installed."));
    }

    #[test]
    fn yes_flag_skips_prompt() {
        let temp = TempDir::new().unwrap();
        let runner = installed_runner();

        let mut ui = MockUI::new();
        let result = UninstallCommand::new(&context(&runner, &temp), UninstallArgs { yes: true })
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.prompts_shown().is_empty());
    }
}
