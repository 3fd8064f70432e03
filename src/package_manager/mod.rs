//! Package manager boundary.
//!
//! - [`pip`] - the Python package manager that owns the backend package
//! - [`conda`] - the system-level package manager used, best effort, for
//!   the native dependency on POSIX hosts
//!
//! Read operations fail with `ProbeFailure`; mutating operations fail with
//! `ActionFailure` carrying the captured output.

pub mod conda;
pub mod pip;

pub use conda::Conda;
pub use pip::Pip;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{InstallerError, Result};
use crate::shell::{CommandResult, CommandSpec};

/// Runs of PEP 503 separators.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("SEPARATOR_RUN must compile"));

/// One installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Distribution name as reported by the package manager.
    pub name: String,
    /// Installed version, when reported.
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageRecord {
    /// Create a record with a known version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }
}

/// A package with a newer version available remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Distribution name as reported by the package manager.
    pub name: String,
    /// Newest version on the index.
    pub latest_version: String,
}

impl UpdateRecord {
    /// Create an update record.
    pub fn new(name: impl Into<String>, latest_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latest_version: latest_version.into(),
        }
    }
}

/// Operations the installer needs from a package manager.
pub trait PackageManager: Send + Sync {
    /// Every package installed in the active environment.
    fn list_installed(&self) -> Result<Vec<PackageRecord>>;

    /// Installed packages that have a newer version remotely.
    fn list_outdated(&self) -> Result<Vec<UpdateRecord>>;

    /// Install a package from the index by name.
    fn install(&self, name: &str) -> Result<()>;

    /// Install a local distribution archive.
    fn install_local(&self, archive: &Path) -> Result<()>;

    /// Remove a package by name.
    fn uninstall(&self, name: &str) -> Result<()>;

    /// Upgrade a package to the newest version on the index.
    fn upgrade(&self, name: &str) -> Result<()>;
}

/// Normalize a distribution name for comparison.
///
/// Lowercases and collapses runs of `-`, `_` and `.` into a single `-`,
/// so `Bio_PyVOL` and `bio-pyvol` compare equal.
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_RUN
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Whether two distribution names refer to the same package.
pub fn same_package(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Turn a finished mutating command into `Ok` or `ActionFailure`.
pub(crate) fn require_success(
    action: &str,
    spec: &CommandSpec,
    outcome: std::io::Result<CommandResult>,
) -> Result<CommandResult> {
    match outcome {
        Ok(result) if result.success => Ok(result),
        Ok(result) => Err(InstallerError::ActionFailure {
            action: action.to_string(),
            command: spec.to_string(),
            code: result.exit_code,
            output: result.combined_output(),
        }),
        Err(e) => Err(InstallerError::ActionFailure {
            action: action.to_string(),
            command: spec.to_string(),
            code: None,
            output: format!("could not start {}: {}", spec.program.display(), e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn normalize_collapses_separators_and_case() {
        assert_eq!(normalize_name("Bio_PyVOL"), "bio-pyvol");
        assert_eq!(normalize_name("bio-pyvol"), "bio-pyvol");
        assert_eq!(normalize_name("scikit__learn"), "scikit-learn");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name(" numpy "), "numpy");
        assert_eq!(normalize_name("Bio-_.PyVOL"), "bio-pyvol");
    }

    #[test]
    fn same_package_ignores_spelling() {
        assert!(same_package("bio_pyvol", "bio-pyvol"));
        assert!(same_package("Scikit-Learn", "scikit_learn"));
        assert!(!same_package("bio-pyvol", "pyvol"));
    }

    #[test]
    fn package_record_version_is_optional_in_json() {
        let records: Vec<PackageRecord> =
            serde_json::from_str(r#"[{"name": "numpy"}, {"name": "scipy", "version": "1.11.4"}]"#)
                .unwrap();
        assert_eq!(records[0].version, None);
        assert_eq!(records[1].version.as_deref(), Some("1.11.4"));
    }

    #[test]
    fn require_success_maps_non_zero_exit() {
        let spec = CommandSpec::new("python3").args(["-m", "pip", "install", "bio-pyvol"]);
        let outcome = Ok(CommandResult::failure(
            Some(1),
            String::new(),
            "ERROR: No matching distribution".into(),
            Duration::from_millis(5),
        ));

        let err = require_success("Install", &spec, outcome).unwrap_err();
        match err {
            InstallerError::ActionFailure {
                action,
                command,
                code,
                output,
            } => {
                assert_eq!(action, "Install");
                assert_eq!(command, "python3 -m pip install bio-pyvol");
                assert_eq!(code, Some(1));
                assert!(output.contains("No matching distribution"));
            }
            other => panic!("Expected ActionFailure, got {:?}", other),
        }
    }

    #[test]
    fn require_success_maps_spawn_errors() {
        let spec = CommandSpec::new("/missing/python");
        let outcome = Err(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"));

        let err = require_success("Uninstall", &spec, outcome).unwrap_err();
        assert!(matches!(err, InstallerError::ActionFailure { code: None, .. }));
    }
}
