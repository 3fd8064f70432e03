//! Conda as the system-level package manager for the native dependency.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::require_success;
use crate::error::Result;
use crate::shell::{CommandRunner, CommandSpec};

/// Conda bound to one executable.
#[derive(Clone)]
pub struct Conda {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Conda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conda")
            .field("executable", &self.executable)
            .finish()
    }
}

impl Conda {
    /// Create a conda client.
    pub fn new(executable: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    /// The conda executable in use.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `conda install -y -c <channel> <package>`.
    pub fn install_from_channel(&self, channel: &str, package: &str) -> Result<()> {
        let spec = CommandSpec::new(&self.executable).args(["install", "-y", "-c", channel, package]);
        info!("Provisioning {} from {}: {}", package, channel, spec);
        require_success("Dependency install", &spec, self.runner.run(&spec)).map(|_| ())
    }
}
