//! Probe orchestration and state derivation.
//!
//! [`reconcile`] is a pure function from probe results to an
//! [`InstallationState`]; [`Reconciler`] runs the probes and feeds it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{InstallPhase, InstallationState, PrimaryAction};
use crate::config::{InstallerConfig, GUI_VERSION};
use crate::error::Result;
use crate::package_manager::{PackageManager, PackageRecord, Pip, UpdateRecord};
use crate::probes::{
    find_backend, find_package, update_for, CacheProbe, DeclaredVersionProbe, DependencyProbe,
    DependencyStatus, PackageInventoryProbe, Presence, RemoteAvailabilityProbe, UpdateCheck,
};
use crate::shell::CommandRunner;

/// Names the reconciler looks for in probe results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracked {
    pub backend_package: String,
    pub advisory_packages: Vec<String>,
    pub gui_version: String,
}

impl Tracked {
    /// Tracked names from a configuration.
    pub fn from_config(config: &InstallerConfig) -> Self {
        Self {
            backend_package: config.backend.package.clone(),
            advisory_packages: config.advisory_packages.clone(),
            gui_version: GUI_VERSION.to_string(),
        }
    }
}

/// Raw results of one probe pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSnapshot {
    /// Installed packages.
    pub packages: Vec<PackageRecord>,
    /// Native dependency lookup.
    pub dependency: DependencyStatus,
    /// Outdated listing: `None` when not queried, `Err` when the query failed.
    pub outdated: Option<std::result::Result<Vec<UpdateRecord>, String>>,
    /// GUI version declared by the backend.
    pub declared_gui_version: Presence<String>,
    /// Cached archive, if any.
    pub cache_archive: Option<PathBuf>,
}

/// Derive the installation state from one probe pass.
pub fn reconcile(snapshot: &ProbeSnapshot, tracked: &Tracked) -> InstallationState {
    let backend = find_backend(&snapshot.packages, &tracked.backend_package);
    let backend_installed = backend.is_some();
    let backend_version = backend.and_then(|b| b.version);

    let advisory = tracked
        .advisory_packages
        .iter()
        .map(|name| {
            let version = find_package(&snapshot.packages, name).and_then(|p| p.version.clone());
            (name.clone(), version)
        })
        .collect::<BTreeMap<_, _>>();

    let update_check = match (&snapshot.outdated, backend_installed) {
        (Some(Ok(updates)), true) => match update_for(updates, &tracked.backend_package) {
            Some(update) => UpdateCheck::Available {
                latest: update.latest_version.clone(),
            },
            None => UpdateCheck::UpToDate,
        },
        (Some(Err(reason)), true) => UpdateCheck::Failed {
            reason: reason.clone(),
        },
        _ => UpdateCheck::NotChecked,
    };

    let phase = if !backend_installed {
        InstallPhase::NotInstalled
    } else if !snapshot.dependency.is_found() {
        InstallPhase::InstalledMissingDependency
    } else if update_check.was_checked() {
        InstallPhase::InstalledReadyChecked
    } else {
        InstallPhase::InstalledReady
    };

    let primary_action = match phase {
        InstallPhase::NotInstalled => PrimaryAction::InstallFromRemote,
        InstallPhase::InstalledMissingDependency => PrimaryAction::Uninstall,
        InstallPhase::InstalledReady => PrimaryAction::CheckForUpdates,
        InstallPhase::InstalledReadyChecked => match update_check.latest() {
            Some(latest) => PrimaryAction::Update {
                target_version: latest.to_string(),
            },
            None => PrimaryAction::CheckForUpdates,
        },
    };

    let declared_gui_version = if backend_installed {
        snapshot.declared_gui_version.clone()
    } else {
        Presence::Absent
    };

    InstallationState {
        backend_installed,
        backend_version,
        dependency: snapshot.dependency.clone(),
        advisory,
        update_check,
        gui_version: tracked.gui_version.clone(),
        declared_gui_version,
        cache_archive: snapshot.cache_archive.clone(),
        phase,
        primary_action,
    }
}

/// Runs every probe and reconciles the results.
pub struct Reconciler {
    tracked: Tracked,
    inventory: PackageInventoryProbe,
    remote: RemoteAvailabilityProbe,
    dependency: DependencyProbe,
    cache: CacheProbe,
    declared: DeclaredVersionProbe,
}

impl Reconciler {
    /// Build the probes for a configuration, sharing one command runner.
    pub fn new(config: &InstallerConfig, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let pip = Pip::new(&config.python, runner);
        let manager: Arc<dyn PackageManager> = Arc::new(pip.clone());

        let mut dependency = DependencyProbe::new(&config.dependency.executable);
        if let Some(dir) = config.python_dir() {
            dependency = dependency.with_extra_dir(dir);
        }

        Ok(Self {
            tracked: Tracked::from_config(config),
            inventory: PackageInventoryProbe::new(manager.clone()),
            remote: RemoteAvailabilityProbe::new(manager),
            dependency,
            cache: CacheProbe::new(config.cache_dir(), &config.cache.pattern)?,
            declared: DeclaredVersionProbe::new(
                pip,
                &config.backend.module,
                &config.backend.gui_version_attribute,
            ),
        })
    }

    /// Replace the dependency probe (custom search path in tests).
    pub fn with_dependency_probe(mut self, probe: DependencyProbe) -> Self {
        self.dependency = probe;
        self
    }

    /// The tracked names.
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    /// Run the probes.
    ///
    /// Fails only when the inventory cannot be listed. The outdated listing
    /// is queried only when `check_updates` is set and the backend is
    /// installed; its failure is recorded in the snapshot.
    pub fn probe(&self, check_updates: bool) -> Result<ProbeSnapshot> {
        let packages = self.inventory.probe()?;
        let backend = find_backend(&packages, &self.tracked.backend_package);

        let outdated = match (&backend, check_updates) {
            (Some(backend), true) => Some(self.remote.probe(backend).map_err(|e| {
                warn!("Update check failed: {}", e);
                e.to_string()
            })),
            (None, true) => {
                debug!("Skipping update check: backend is not installed");
                None
            }
            (_, false) => None,
        };

        let declared_gui_version = if backend.is_some() {
            self.declared.probe()
        } else {
            Presence::Absent
        };

        Ok(ProbeSnapshot {
            packages,
            dependency: self.dependency.probe(),
            outdated,
            declared_gui_version,
            cache_archive: self.cache.probe(),
        })
    }

    /// One full reconciliation cycle.
    pub fn refresh(&self, check_updates: bool) -> Result<InstallationState> {
        let snapshot = self.probe(check_updates)?;
        let state = reconcile(&snapshot, &self.tracked);
        info!("Installation is {} (next: {:?})", state.phase, state.primary_action);
        Ok(state)
    }
}
