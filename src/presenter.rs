//! Rendering an installation state into control-surface terms.
//!
//! [`StatusView`] is a plain value derived from one [`InstallationState`];
//! it holds labels, enablement and status text, and nothing that could go
//! stale.

use serde::Serialize;

use crate::error::InstallerError;
use crate::probes::{Presence, UpdateCheck};
use crate::reconcile::{Action, InstallationState};

/// How a value should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Ok,
    Missing,
    Info,
}

/// One "name: version" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionLine {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl VersionLine {
    fn new(label: impl Into<String>, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone,
        }
    }

    fn optional(label: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::new(label, v, Tone::Ok),
            None => Self::new(label, "not found", Tone::Missing),
        }
    }
}

/// A button on the control surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
    pub action: Option<Action>,
}

impl ButtonView {
    fn new(label: String, action: Action, enabled: bool) -> Self {
        Self {
            label,
            enabled,
            action: Some(action),
        }
    }

    fn disabled(label: String) -> Self {
        Self {
            label,
            enabled: false,
            action: None,
        }
    }
}

/// Everything the control surface shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub title: String,
    pub versions: Vec<VersionLine>,
    pub primary: ButtonView,
    pub secondary: ButtonView,
    pub remote_status: String,
    pub status: Vec<String>,
    pub domain_enabled: bool,
    pub unknown: bool,
}

/// Button label for an action.
pub fn action_label(action: Action, name: &str) -> String {
    match action {
        Action::InstallFromRemote => format!("Install {} from PyPI", name),
        Action::InstallFromCache => format!("Install {} from Cache", name),
        Action::Uninstall => format!("Uninstall {}", name),
        Action::CheckForUpdates => "Check for Updates".to_string(),
        Action::Update => format!("Update {}", name),
    }
}

fn not_queried() -> String {
    "PyPI has not yet been queried.".to_string()
}

impl StatusView {
    /// Build the view for a reconciled state.
    pub fn from_state(state: &InstallationState, name: &str) -> Self {
        let title = match (&state.backend_version, state.backend_installed) {
            (Some(version), true) => format!("{} v{}", name, version),
            _ => name.to_string(),
        };

        let mut versions = vec![VersionLine::optional(
            name.to_lowercase(),
            state.backend_version.as_deref().filter(|_| state.backend_installed),
        )];
        versions.push(gui_line(state, name));
        for (package, version) in &state.advisory {
            versions.push(VersionLine::optional(package.as_str(), version.as_deref()));
        }
        versions.push(match &state.dependency.path {
            Some(path) => VersionLine::new(
                format!("{} exe", state.dependency.name),
                path.display().to_string(),
                Tone::Ok,
            ),
            None => VersionLine::new(
                format!("{} exe", state.dependency.name),
                "not found",
                Tone::Missing,
            ),
        });

        let button = |action: Action| {
            ButtonView::new(action_label(action, name), action, state.allows(action))
        };
        let primary = button(state.primary_action.action());
        let secondary = button(state.secondary_action());

        let remote_status = match (&state.update_check, state.backend_installed) {
            (_, false) | (UpdateCheck::NotChecked, _) => not_queried(),
            (UpdateCheck::UpToDate, true) => format!(
                "Local {} is up to date (version {})",
                name,
                state.backend_version.as_deref().unwrap_or("unknown")
            ),
            (UpdateCheck::Available { latest }, true) => format!(
                "A new version of {} is available through PyPI: {} -> {}",
                name,
                state.backend_version.as_deref().unwrap_or("unknown"),
                latest
            ),
            (UpdateCheck::Failed { reason }, true) => {
                format!("PyPI could not be queried: {}", reason)
            }
        };

        let mut status = Vec::new();
        if state.backend_installed {
            if state.dependency_installed() {
                status.push(format!("{} seems to be correctly installed.", name));
            } else {
                status.push(format!(
                    "Error: {} must be installed for {} to run.",
                    state.dependency.name.to_uppercase(),
                    name
                ));
            }
            if state.gui_version_mismatch().is_some() {
                status.push(format!(
                    "GUI version mismatch: check whether the {} backend is up to date and reinstall the newest version of the plugin.",
                    name
                ));
            }
        } else {
            status.push(format!("{} is not currently installed.", name));
            if state.cache_archive.is_some() {
                status.push(format!("{} can be installed from a local cache.", name));
            }
        }

        Self {
            title,
            versions,
            primary,
            secondary,
            remote_status,
            status,
            domain_enabled: state.domain_enabled(),
            unknown: false,
        }
    }

    /// View for a cycle whose probes failed: nothing is enabled.
    pub fn unknown(error: &InstallerError, name: &str) -> Self {
        Self {
            title: name.to_string(),
            versions: Vec::new(),
            primary: ButtonView::disabled(action_label(Action::InstallFromRemote, name)),
            secondary: ButtonView::disabled(action_label(Action::InstallFromCache, name)),
            remote_status: not_queried(),
            status: vec![format!("Status unknown: {}", error)],
            domain_enabled: false,
            unknown: true,
        }
    }
}

fn gui_line(state: &InstallationState, name: &str) -> VersionLine {
    let label = format!("{} gui", name.to_lowercase());
    match &state.declared_gui_version {
        Presence::Present(declared) if *declared == state.gui_version => {
            VersionLine::new(label, state.gui_version.as_str(), Tone::Ok)
        }
        Presence::Present(declared) => VersionLine::new(
            label,
            format!("{} ({} expected)", state.gui_version, declared),
            Tone::Info,
        ),
        Presence::Absent | Presence::Unknown(_) => {
            VersionLine::new(label, state.gui_version.as_str(), Tone::Info)
        }
    }
}
