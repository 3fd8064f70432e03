//! Installed package inventory.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::package_manager::{same_package, PackageManager, PackageRecord};

/// Proof that the backend package is installed.
///
/// Only obtainable from an inventory listing, which is what makes it safe
/// to hand to [`RemoteAvailabilityProbe`](super::RemoteAvailabilityProbe):
/// checking for updates of an absent package cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBackend {
    /// Distribution name as reported by the package manager.
    pub name: String,
    /// Installed version, when reported.
    pub version: Option<String>,
}

/// Lists every installed package.
pub struct PackageInventoryProbe {
    manager: Arc<dyn PackageManager>,
}

impl PackageInventoryProbe {
    /// Create a probe over a package manager.
    pub fn new(manager: Arc<dyn PackageManager>) -> Self {
        Self { manager }
    }

    /// The full inventory. Failure means "unknown", never "empty".
    pub fn probe(&self) -> Result<Vec<PackageRecord>> {
        let packages = self.manager.list_installed()?;
        debug!("Inventory lists {} packages", packages.len());
        Ok(packages)
    }
}

/// Find a package in an inventory, comparing normalized names.
pub fn find_package<'a>(packages: &'a [PackageRecord], name: &str) -> Option<&'a PackageRecord> {
    packages.iter().find(|p| same_package(&p.name, name))
}

/// Find the backend package in an inventory.
pub fn find_backend(packages: &[PackageRecord], backend: &str) -> Option<InstalledBackend> {
    find_package(packages, backend).map(|p| InstalledBackend {
        name: p.name.clone(),
        version: p.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::Pip;
    use crate::shell::{ScriptedResponse, ScriptedRunner};

    fn inventory() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("numpy", "1.26.4"),
            PackageRecord::new("Bio_PyVOL", "1.0.0"),
            PackageRecord::new("scikit-learn", "1.4.0"),
        ]
    }

    #[test]
    fn find_package_matches_normalized_names() {
        let packages = inventory();
        assert_eq!(
            find_package(&packages, "bio-pyvol").and_then(|p| p.version.as_deref()),
            Some("1.0.0")
        );
        assert!(find_package(&packages, "scikit_learn").is_some());
        assert!(find_package(&packages, "trimesh").is_none());
    }

    #[test]
    fn find_backend_yields_proof_only_when_installed() {
        let packages = inventory();
        let backend = find_backend(&packages, "bio-pyvol").unwrap();
        assert_eq!(backend.version.as_deref(), Some("1.0.0"));

        assert!(find_backend(&[], "bio-pyvol").is_none());
    }

    #[test]
    fn probe_propagates_failure() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("pip list", ScriptedResponse::fail(1, "No module named pip"));
        let probe = PackageInventoryProbe::new(Arc::new(Pip::new("python3", runner)));

        let err = probe.probe().unwrap_err();
        assert!(err.is_probe_failure());
    }

    #[test]
    fn probe_returns_full_listing() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "pip list",
            ScriptedResponse::ok(r#"[{"name":"numpy","version":"1.26.4"}]"#),
        );
        let probe = PackageInventoryProbe::new(Arc::new(Pip::new("python3", runner)));

        assert_eq!(probe.probe().unwrap(), vec![PackageRecord::new("numpy", "1.26.4")]);
    }
}
