//! Outcomes of successful actions.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::reconcile::Action;

/// Something the user should know after an action succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The native dependency was provisioned.
    DependencyInstalled { path: PathBuf },
    /// Provisioning the native dependency failed.
    DependencyInstallFailed { reason: String },
    /// The native dependency is still not reachable.
    DependencyStillMissing,
    /// The backend's commands are available.
    Activated { commands: Vec<String> },
    /// The backend's commands could not be made available.
    ActivationFailed { reason: String },
    /// The cache directory was deleted after a successful install.
    CacheRemoved { dir: PathBuf },
    /// The cache directory was kept.
    CacheRetained { dir: PathBuf },
    /// The plugin registration must be removed separately.
    PluginRemovalRequired,
    /// The host keeps running the previously loaded code.
    RestartRequired,
}

impl Notice {
    /// Whether the notice reports something that did not go to plan.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::DependencyInstallFailed { .. }
                | Notice::DependencyStillMissing
                | Notice::ActivationFailed { .. }
                | Notice::CacheRetained { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DependencyInstalled { path } => {
                write!(f, "Dependency installed at {}", path.display())
            }
            Notice::DependencyInstallFailed { reason } => {
                write!(f, "Could not install the dependency automatically: {}", reason)
            }
            Notice::DependencyStillMissing => write!(
                f,
                "The dependency executable is still not on the search path; install it manually"
            ),
            Notice::Activated { commands } => {
                write!(f, "Commands available: {}", commands.join(", "))
            }
            Notice::ActivationFailed { reason } => write!(
                f,
                "Commands could not be activated ({}); restart the host application to use them",
                reason
            ),
            Notice::CacheRemoved { dir } => write!(f, "Removed cache directory {}", dir.display()),
            Notice::CacheRetained { dir } => write!(f, "Kept cache directory {}", dir.display()),
            Notice::PluginRemovalRequired => write!(
                f,
                "The backend has been uninstalled; the plugin itself must also be removed with the host's plugin manager"
            ),
            Notice::RestartRequired => write!(
                f,
                "The backend has been updated; the host will not load the new code until it is restarted"
            ),
        }
    }
}

/// What a successful action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub action: Action,
    pub notices: Vec<Notice>,
}

impl ActionReport {
    /// A report with no notices.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            notices: Vec::new(),
        }
    }

    /// Append a notice.
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// Whether any notice is a warning.
    pub fn has_warnings(&self) -> bool {
        self.notices.iter().any(Notice::is_warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_flagged() {
        let report = ActionReport::new(Action::InstallFromRemote).with_notice(Notice::Activated {
            commands: vec!["pocket".into()],
        });
        assert!(!report.has_warnings());

        let report = report.with_notice(Notice::ActivationFailed {
            reason: "import failed".into(),
        });
        assert!(report.has_warnings());
    }

    #[test]
    fn notices_render_for_humans() {
        assert_eq!(
            Notice::Activated {
                commands: vec!["pocket".into(), "load_pocket".into()]
            }
            .to_string(),
            "Commands available: pocket, load_pocket"
        );
        assert!(Notice::PluginRemovalRequired
            .to_string()
            .contains("plugin manager"));
    }

    #[test]
    fn report_serializes_notice_kind() {
        let report = ActionReport::new(Action::Update).with_notice(Notice::RestartRequired);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], "update");
        assert_eq!(json["notices"][0]["kind"], "restart_required");
    }
}
