//! Making the backend's commands available after install.

use tracing::debug;

use crate::error::{InstallerError, Result};
use crate::package_manager::Pip;

/// Registers the backend's commands with the host application.
pub trait HostActivator: Send + Sync {
    /// Make `commands` callable. Fails with `ActivationFailure`.
    fn activate(&self, commands: &[String]) -> Result<()>;
}

/// Confirms the commands are importable by the interpreter the host runs.
///
/// The host picks up newly installed modules on its next plugin load;
/// this verifies the load will find every command.
#[derive(Debug, Clone)]
pub struct ImportCheckActivator {
    pip: Pip,
    module: String,
}

impl ImportCheckActivator {
    /// Check `module` with the interpreter behind `pip`.
    pub fn new(pip: Pip, module: impl Into<String>) -> Self {
        Self {
            pip,
            module: module.into(),
        }
    }

    fn snippet(&self, commands: &[String]) -> String {
        format!(
            "import importlib; m = importlib.import_module({:?}); print(','.join(c for c in {:?} if not callable(getattr(m, c, None))))",
            self.module, commands
        )
    }
}

impl HostActivator for ImportCheckActivator {
    fn activate(&self, commands: &[String]) -> Result<()> {
        let result = self
            .pip
            .run_snippet(&self.snippet(commands))
            .map_err(|e| InstallerError::ActivationFailure {
                message: format!("could not run interpreter: {}", e),
            })?;

        if !result.success {
            let reason = result
                .stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("import failed")
                .trim()
                .to_string();
            return Err(InstallerError::ActivationFailure {
                message: format!("{} could not be imported: {}", self.module, reason),
            });
        }

        let missing = result.stdout.trim();
        if !missing.is_empty() {
            return Err(InstallerError::ActivationFailure {
                message: format!("{} does not provide: {}", self.module, missing),
            });
        }

        debug!("Activated {}", commands.join(", "));
        Ok(())
    }
}

/// Activation that always succeeds without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActivator;

impl HostActivator for NullActivator {
    fn activate(&self, _commands: &[String]) -> Result<()> {
        Ok(())
    }
}
