//! Remote update availability.

use std::sync::Arc;

use tracing::debug;

use super::inventory::InstalledBackend;
use crate::error::Result;
use crate::package_manager::{same_package, PackageManager, UpdateRecord};

/// Asks the package index which installed packages are outdated.
pub struct RemoteAvailabilityProbe {
    manager: Arc<dyn PackageManager>,
}

impl RemoteAvailabilityProbe {
    /// Create a probe over a package manager.
    pub fn new(manager: Arc<dyn PackageManager>) -> Self {
        Self { manager }
    }

    /// Outdated packages. Requires proof the backend is installed.
    ///
    /// A failure here is a `ProbeFailure`, never an empty list.
    pub fn probe(&self, backend: &InstalledBackend) -> Result<Vec<UpdateRecord>> {
        debug!(
            "Checking for updates of {} {}",
            backend.name,
            backend.version.as_deref().unwrap_or("(unknown version)")
        );
        self.manager.list_outdated()
    }
}

/// The update record for `name`, if the listing has one.
pub fn update_for<'a>(updates: &'a [UpdateRecord], name: &str) -> Option<&'a UpdateRecord> {
    updates.iter().find(|u| same_package(&u.name, name))
}
