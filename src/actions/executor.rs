//! Mutating operations against the package managers.
//!
//! Every operation is fail-loud: a failing package manager command returns
//! `ActionFailure` with the captured output. Secondary work (dependency
//! provisioning, activation, cache cleanup) never fails the action and is
//! reported as a [`Notice`] instead.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::report::{ActionReport, Notice};
use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result};
use crate::host::HostActivator;
use crate::package_manager::{Conda, PackageManager, Pip};
use crate::probes::DependencyProbe;
use crate::reconcile::Action;
use crate::shell::{CommandRunner, Platform};

/// Performs install, uninstall and update.
pub struct ActionExecutor {
    packages: Arc<dyn PackageManager>,
    conda: Conda,
    activator: Arc<dyn HostActivator>,
    dependency: DependencyProbe,
    backend_package: String,
    host_commands: Vec<String>,
    conda_channel: String,
    conda_package: String,
    platform: Platform,
}

impl ActionExecutor {
    /// Build an executor for a configuration.
    pub fn new(
        config: &InstallerConfig,
        runner: Arc<dyn CommandRunner>,
        activator: Arc<dyn HostActivator>,
    ) -> Self {
        let mut dependency = DependencyProbe::new(&config.dependency.executable);
        if let Some(dir) = config.python_dir() {
            dependency = dependency.with_extra_dir(dir);
        }

        Self {
            packages: Arc::new(Pip::new(&config.python, runner.clone())),
            conda: Conda::new(config.conda_executable(), runner),
            activator,
            dependency,
            backend_package: config.backend.package.clone(),
            host_commands: config.backend.host_commands.clone(),
            conda_channel: config.dependency.conda.channel.clone(),
            conda_package: config.dependency.conda.package.clone(),
            platform: Platform::current(),
        }
    }

    /// Replace the dependency probe.
    pub fn with_dependency_probe(mut self, probe: DependencyProbe) -> Self {
        self.dependency = probe;
        self
    }

    /// Override the platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Install the backend from the package index, then provision the
    /// dependency (POSIX, best effort) and activate the commands.
    pub fn install_from_remote(&self) -> Result<ActionReport> {
        info!("Installing {} from the package index", self.backend_package);
        self.packages.install(&self.backend_package)?;

        let mut report = ActionReport::new(Action::InstallFromRemote);
        if let Some(notice) = self.ensure_dependency() {
            report = report.with_notice(notice);
        }
        Ok(report.with_notice(self.activate()))
    }

    /// Install a cached archive. The cache directory is removed only when
    /// both the install and the activation succeed.
    pub fn install_from_cache(&self, archive: &Path, cache_dir: &Path) -> Result<ActionReport> {
        if !archive.is_file() {
            return Err(InstallerError::NoCachedArchive {
                dir: cache_dir.to_path_buf(),
            });
        }

        info!("Installing {} from {}", self.backend_package, archive.display());
        self.packages.install_local(archive)?;

        let activation = self.activate();
        let activated = matches!(activation, Notice::Activated { .. });
        let report = ActionReport::new(Action::InstallFromCache).with_notice(activation);

        let cleanup = if activated {
            match fs::remove_dir_all(cache_dir) {
                Ok(()) => Notice::CacheRemoved {
                    dir: cache_dir.to_path_buf(),
                },
                Err(e) => {
                    warn!("Could not remove {}: {}", cache_dir.display(), e);
                    Notice::CacheRetained {
                        dir: cache_dir.to_path_buf(),
                    }
                }
            }
        } else {
            Notice::CacheRetained {
                dir: cache_dir.to_path_buf(),
            }
        };
        Ok(report.with_notice(cleanup))
    }

    /// Remove the backend package. The plugin registration stays.
    pub fn uninstall(&self) -> Result<ActionReport> {
        info!("Uninstalling {}", self.backend_package);
        self.packages.uninstall(&self.backend_package)?;
        Ok(ActionReport::new(Action::Uninstall).with_notice(Notice::PluginRemovalRequired))
    }

    /// Upgrade the backend package to the newest version.
    pub fn update(&self) -> Result<ActionReport> {
        info!("Updating {}", self.backend_package);
        self.packages.upgrade(&self.backend_package)?;
        Ok(ActionReport::new(Action::Update).with_notice(Notice::RestartRequired))
    }

    fn ensure_dependency(&self) -> Option<Notice> {
        if self.dependency.probe().is_found() {
            return None;
        }
        if !self.platform.is_posix() {
            return Some(Notice::DependencyStillMissing);
        }

        match self
            .conda
            .install_from_channel(&self.conda_channel, &self.conda_package)
        {
            Ok(()) => Some(match self.dependency.probe().path {
                Some(path) => Notice::DependencyInstalled { path },
                None => Notice::DependencyStillMissing,
            }),
            Err(e) => {
                warn!("Dependency provisioning failed: {}", e);
                Some(Notice::DependencyInstallFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn activate(&self) -> Notice {
        match self.activator.activate(&self.host_commands) {
            Ok(()) => Notice::Activated {
                commands: self.host_commands.clone(),
            },
            Err(InstallerError::ActivationFailure { message }) => {
                warn!("Activation failed: {}", message);
                Notice::ActivationFailed { reason: message }
            }
            Err(e) => {
                warn!("Activation failed: {}", e);
                Notice::ActivationFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
