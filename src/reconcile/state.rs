//! Installation state and the actions it permits.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::probes::{DependencyStatus, Presence, UpdateCheck};

/// Where the installation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallPhase {
    /// The backend package is not installed.
    NotInstalled,
    /// The backend is installed but the native dependency is not reachable.
    InstalledMissingDependency,
    /// Everything is installed; no update check has run this cycle.
    InstalledReady,
    /// Everything is installed and an update check has run.
    InstalledReadyChecked,
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InstallPhase::NotInstalled => "not installed",
            InstallPhase::InstalledMissingDependency => "installed without its dependency",
            InstallPhase::InstalledReady => "installed",
            InstallPhase::InstalledReadyChecked => "installed (update check run)",
        };
        f.write_str(text)
    }
}

/// A mutating (or network-querying) operation the user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    InstallFromRemote,
    InstallFromCache,
    Uninstall,
    Update,
    CheckForUpdates,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::InstallFromRemote => "Install from the package index",
            Action::InstallFromCache => "Install from cache",
            Action::Uninstall => "Uninstall",
            Action::Update => "Update",
            Action::CheckForUpdates => "Check for updates",
        };
        f.write_str(text)
    }
}

/// The single action the control surface should offer next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PrimaryAction {
    InstallFromRemote,
    Uninstall,
    CheckForUpdates,
    Update { target_version: String },
}

impl PrimaryAction {
    /// The action this recommendation triggers.
    pub fn action(&self) -> Action {
        match self {
            PrimaryAction::InstallFromRemote => Action::InstallFromRemote,
            PrimaryAction::Uninstall => Action::Uninstall,
            PrimaryAction::CheckForUpdates => Action::CheckForUpdates,
            PrimaryAction::Update { .. } => Action::Update,
        }
    }
}

/// One reconciled view of the installation.
///
/// Built fresh from probe results on every cycle and never updated in
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationState {
    /// Whether the backend package is in the inventory.
    pub backend_installed: bool,
    /// Installed backend version.
    pub backend_version: Option<String>,
    /// Native dependency lookup result.
    pub dependency: DependencyStatus,
    /// Advisory library versions (`None` when not installed).
    pub advisory: BTreeMap<String, Option<String>>,
    /// Outcome of the remote update check for this cycle.
    pub update_check: UpdateCheck,
    /// GUI version of this build.
    pub gui_version: String,
    /// GUI version the installed backend declares.
    pub declared_gui_version: Presence<String>,
    /// Cached archive available for an offline install.
    pub cache_archive: Option<PathBuf>,
    /// Derived phase.
    pub phase: InstallPhase,
    /// Derived primary action.
    pub primary_action: PrimaryAction,
}

impl InstallationState {
    /// Whether the dependency executable was found.
    pub fn dependency_installed(&self) -> bool {
        self.dependency.is_found()
    }

    /// Whether the backend's own functionality can be used.
    ///
    /// Only the backend and the dependency gate this; advisory packages
    /// and version mismatches never do.
    pub fn domain_enabled(&self) -> bool {
        self.backend_installed && self.dependency_installed()
    }

    /// The offer shown next to the primary action.
    ///
    /// Whether it can be triggered right now is up to [`Self::allows`]; a
    /// cache install is offered but disabled until an archive is found.
    pub fn secondary_action(&self) -> Action {
        match self.phase {
            InstallPhase::NotInstalled => Action::InstallFromCache,
            InstallPhase::InstalledMissingDependency if self.update_target().is_some() => {
                Action::Update
            }
            InstallPhase::InstalledMissingDependency => Action::CheckForUpdates,
            InstallPhase::InstalledReady | InstallPhase::InstalledReadyChecked => {
                Action::Uninstall
            }
        }
    }

    /// Target version when an update is known to be available.
    pub fn update_target(&self) -> Option<&str> {
        self.update_check.latest()
    }

    /// Whether `action` may be triggered from this state.
    pub fn allows(&self, action: Action) -> bool {
        match (self.phase, action) {
            (InstallPhase::NotInstalled, Action::InstallFromRemote) => true,
            (InstallPhase::NotInstalled, Action::InstallFromCache) => self.cache_archive.is_some(),
            (InstallPhase::NotInstalled, _) => false,
            (_, Action::Uninstall | Action::CheckForUpdates) => true,
            (InstallPhase::InstalledReady, Action::Update) => false,
            (_, Action::Update) => self.update_target().is_some(),
            (_, Action::InstallFromRemote | Action::InstallFromCache) => false,
        }
    }

    /// Every action legal from this state, primary first.
    pub fn legal_actions(&self) -> Vec<Action> {
        let primary = self.primary_action.action();
        let mut actions = vec![primary];
        for action in [
            Action::InstallFromRemote,
            Action::InstallFromCache,
            Action::Update,
            Action::CheckForUpdates,
            Action::Uninstall,
        ] {
            if action != primary && self.allows(action) {
                actions.push(action);
            }
        }
        actions
    }

    /// The declared GUI version, when it differs from this build's.
    pub fn gui_version_mismatch(&self) -> Option<&str> {
        self.declared_gui_version
            .as_present()
            .map(String::as_str)
            .filter(|declared| *declared != self.gui_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(phase: InstallPhase, primary: PrimaryAction) -> InstallationState {
        let installed = phase != InstallPhase::NotInstalled;
        let dependency = if matches!(phase, InstallPhase::InstalledMissingDependency) {
            DependencyStatus::missing("msms")
        } else {
            DependencyStatus::found("msms", "/usr/bin/msms")
        };
        InstallationState {
            backend_installed: installed,
            backend_version: installed.then(|| "1.0.0".to_string()),
            dependency,
            advisory: BTreeMap::new(),
            update_check: UpdateCheck::NotChecked,
            gui_version: "1.1.0".into(),
            declared_gui_version: Presence::Absent,
            cache_archive: None,
            phase,
            primary_action: primary,
        }
    }

    #[test]
    fn not_installed_allows_remote_install_only_without_cache() {
        let s = state(InstallPhase::NotInstalled, PrimaryAction::InstallFromRemote);
        assert!(s.allows(Action::InstallFromRemote));
        assert!(!s.allows(Action::InstallFromCache));
        assert!(!s.allows(Action::CheckForUpdates));
        assert!(!s.allows(Action::Uninstall));
        assert!(!s.allows(Action::Update));
        assert_eq!(s.legal_actions(), vec![Action::InstallFromRemote]);
    }

    #[test]
    fn cache_hit_enables_cache_install() {
        let mut s = state(InstallPhase::NotInstalled, PrimaryAction::InstallFromRemote);
        s.cache_archive = Some(PathBuf::from("/cache/bio_pyvol-1.1.0.tar.gz"));
        assert!(s.allows(Action::InstallFromCache));
        assert_eq!(s.secondary_action(), Action::InstallFromCache);
    }

    #[test]
    fn cache_install_is_offered_but_disabled_without_archive() {
        let s = state(InstallPhase::NotInstalled, PrimaryAction::InstallFromRemote);
        assert_eq!(s.secondary_action(), Action::InstallFromCache);
        assert!(!s.allows(s.secondary_action()));
    }

    #[test]
    fn secondary_offer_is_always_legal_once_installed() {
        let mut missing = state(
            InstallPhase::InstalledMissingDependency,
            PrimaryAction::Uninstall,
        );
        assert_eq!(missing.secondary_action(), Action::CheckForUpdates);
        missing.update_check = UpdateCheck::Available {
            latest: "1.1.0".into(),
        };
        assert_eq!(missing.secondary_action(), Action::Update);
        assert!(missing.allows(missing.secondary_action()));

        let ready = state(InstallPhase::InstalledReady, PrimaryAction::CheckForUpdates);
        assert_eq!(ready.secondary_action(), Action::Uninstall);
        assert!(ready.allows(ready.secondary_action()));
    }

    #[test]
    fn missing_dependency_disables_domain() {
        let mut s = state(
            InstallPhase::InstalledMissingDependency,
            PrimaryAction::Uninstall,
        );
        s.update_check = UpdateCheck::Available {
            latest: "1.1.0".into(),
        };
        assert!(!s.domain_enabled());
        assert!(s.allows(Action::Uninstall));
        assert!(s.allows(Action::Update));
        assert_eq!(s.legal_actions()[0], Action::Uninstall);
    }

    #[test]
    fn ready_allows_check_and_uninstall() {
        let s = state(InstallPhase::InstalledReady, PrimaryAction::CheckForUpdates);
        assert!(s.domain_enabled());
        assert_eq!(
            s.legal_actions(),
            vec![Action::CheckForUpdates, Action::Uninstall]
        );
        assert!(!s.allows(Action::InstallFromRemote));
    }

    #[test]
    fn checked_allows_update_only_when_available() {
        let mut s = state(
            InstallPhase::InstalledReadyChecked,
            PrimaryAction::CheckForUpdates,
        );
        s.update_check = UpdateCheck::UpToDate;
        assert!(!s.allows(Action::Update));

        s.update_check = UpdateCheck::Available {
            latest: "1.1.0".into(),
        };
        s.primary_action = PrimaryAction::Update {
            target_version: "1.1.0".into(),
        };
        assert!(s.allows(Action::Update));
        assert_eq!(s.update_target(), Some("1.1.0"));
        assert_eq!(
            s.legal_actions(),
            vec![Action::Update, Action::CheckForUpdates, Action::Uninstall]
        );
    }

    #[test]
    fn gui_mismatch_only_for_declared_different_version() {
        let mut s = state(InstallPhase::InstalledReady, PrimaryAction::CheckForUpdates);
        assert_eq!(s.gui_version_mismatch(), None);

        s.declared_gui_version = Presence::Present("1.1.0".into());
        assert_eq!(s.gui_version_mismatch(), None);

        s.declared_gui_version = Presence::Present("1.2.0".into());
        assert_eq!(s.gui_version_mismatch(), Some("1.2.0"));
        assert!(s.domain_enabled());

        s.declared_gui_version = Presence::Unknown("import failed".into());
        assert_eq!(s.gui_version_mismatch(), None);
    }
}
