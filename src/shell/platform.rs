//! Platform detection and executable search.

use std::path::{Path, PathBuf};

/// Host platform family, as far as installation decisions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux, macOS and other Unix-likes.
    Posix,
    /// Windows and anything else.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(unix) {
            Platform::Posix
        } else {
            Platform::Other
        }
    }

    /// Whether this is a POSIX-like host.
    pub fn is_posix(&self) -> bool {
        matches!(self, Platform::Posix)
    }

    /// File name of an executable on this platform.
    pub fn executable_file_name(&self, name: &str) -> String {
        match self {
            Platform::Posix => name.to_string(),
            Platform::Other => {
                if Path::new(name).extension().is_some() {
                    name.to_string()
                } else {
                    format!("{}.exe", name)
                }
            }
        }
    }
}

/// Variables set by the CI services we know of.
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Whether a CI service is driving this process. Prompts are never shown
/// under CI.
pub fn is_ci() -> bool {
    CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some())
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Directories listed in `PATH`, in order.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// First executable named `tool` in `dirs`.
///
/// Searches the directories directly rather than shelling out to `which`,
/// which is a builtin on some shells and missing on others.
pub fn resolve_tool_path(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let file_name = Platform::current().executable_file_name(tool);
    dirs.iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
}
