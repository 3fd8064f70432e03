//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`InstallerContext`] holding the wired controller
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::config::{load_config, InstallerConfig};
use crate::controller::Controller;
use crate::error::Result;
use crate::host::{HostActivator, ImportCheckActivator};
use crate::package_manager::Pip;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Exit code for a failed or refused action.
pub const EXIT_ACTION_FAILED: i32 = 1;

/// Exit code when the installation status could not be determined.
pub const EXIT_STATUS_UNKNOWN: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// A controller plus the name the backend is presented under.
pub struct InstallerContext {
    controller: Controller,
    display_name: String,
}

impl InstallerContext {
    /// Wire a context with explicit collaborators.
    pub fn new(
        config: &InstallerConfig,
        runner: Arc<dyn CommandRunner>,
        activator: Arc<dyn HostActivator>,
    ) -> Result<Self> {
        Ok(Self {
            controller: Controller::new(config, runner, activator)?,
            display_name: config.display_name.clone(),
        })
    }

    /// Wire a context that runs real processes.
    pub fn system(config: &InstallerConfig) -> Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
        let activator = ImportCheckActivator::new(
            Pip::new(&config.python, runner.clone()),
            &config.backend.interface_module,
        );
        Self::new(config, runner, Arc::new(activator))
    }

    /// The message-driven controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Name the backend is shown under.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory config discovery starts from.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Load the layered configuration and apply the CLI overrides.
    pub fn load_config(&self, cli: &Cli) -> Result<InstallerConfig> {
        let mut config = load_config(&self.working_dir, cli.config.as_deref())?;
        cli.overrides().apply(&mut config);
        Ok(config)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(Commands::Completions(args)) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let config = self.load_config(cli)?;
        let context = InstallerContext::system(&config)?;
        Self::dispatch_with(&context, cli.command.as_ref(), ui)
    }

    /// Dispatch a command against a prepared context.
    pub fn dispatch_with(
        context: &InstallerContext,
        command: Option<&Commands>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Uninstall(args)) => {
                super::uninstall::UninstallCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Update(args)) => {
                super::update::UpdateCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Next(args)) => {
                super::next::NextCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::status::StatusCommand::new(context, StatusArgs::default()).execute(ui),
        }
    }
}
