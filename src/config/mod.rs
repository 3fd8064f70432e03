//! Configuration loading, merging, and validation.
//!
//! - Schema definitions and built-in defaults in [`schema`]
//! - File discovery, loading, and overrides in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use pyvol_installer::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("installer.yml");
//! fs::write(&path, "python: /opt/conda/bin/python").unwrap();
//!
//! let config = load_config(temp.path(), Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.backend.package, "bio-pyvol");
//! ```
//!
//! # Configuration File Locations
//!
//! Files are discovered and merged in this order:
//! 1. User global config (`~/.pyvol-installer/config.yml`)
//! 2. Local config (`./.pyvol-installer.yml`)
//!
//! `--python` and `--cache-dir` (or `PYVOL_PYTHON` and `PYVOL_CACHE_DIR`)
//! are applied last.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_value, load_layers, ConfigOverrides, ConfigPaths};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    BackendConfig, CacheConfig, CondaConfig, DependencyConfig, InstallerConfig, GUI_VERSION,
};
pub use validator::{validate, validate_config, ValidationError};
