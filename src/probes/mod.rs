//! Read-only probes of the installation.
//!
//! Each probe answers one question about the environment:
//!
//! - [`PackageInventoryProbe`] - what is installed
//! - [`DependencyProbe`] - where the native executable is
//! - [`RemoteAvailabilityProbe`] - what could be upgraded
//! - [`CacheProbe`] - whether a local archive is available
//! - [`DeclaredVersionProbe`] - which GUI version the backend expects

pub mod backend;
pub mod cache;
pub mod dependency;
pub mod inventory;
pub mod remote;
pub mod status;

pub use backend::DeclaredVersionProbe;
pub use cache::CacheProbe;
pub use dependency::DependencyProbe;
pub use inventory::{find_backend, find_package, InstalledBackend, PackageInventoryProbe};
pub use remote::{update_for, RemoteAvailabilityProbe};
pub use status::{DependencyStatus, Presence, UpdateCheck};
