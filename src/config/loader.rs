//! Configuration file discovery and loading.
//!
//! No file is required: missing files simply leave the defaults in place.

use crate::config::merger::merge_configs;
use crate::config::schema::InstallerConfig;
use crate::config::validator::validate;
use crate::error::{InstallerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under the home directory holding the user-global config.
pub const USER_CONFIG_DIR: &str = ".pyvol-installer";

/// File name of the project-local config.
pub const LOCAL_CONFIG_FILE: &str = ".pyvol-installer.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.pyvol-installer/config.yml`)
/// 2. Local config (`./.pyvol-installer.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config.
    pub user_global: Option<PathBuf>,

    /// Config in the working directory.
    pub local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given working directory.
    pub fn discover(working_dir: &Path) -> Self {
        Self::discover_with_home(dirs::home_dir().as_deref(), working_dir)
    }

    /// Discover config files with an explicit home directory.
    pub fn discover_with_home(home: Option<&Path>, working_dir: &Path) -> Self {
        let user_global = home
            .map(|h| h.join(USER_CONFIG_DIR).join("config.yml"))
            .filter(|p| p.is_file());
        let local = Some(working_dir.join(LOCAL_CONFIG_FILE)).filter(|p| p.is_file());
        Self { user_global, local }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.local.iter()).collect()
    }
}

/// Command-line and environment overrides applied after file loading.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Interpreter override (`--python` / `PYVOL_PYTHON`).
    pub python: Option<PathBuf>,

    /// Cache directory override (`--cache-dir` / `PYVOL_CACHE_DIR`).
    pub cache_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut InstallerConfig) {
        if let Some(python) = &self.python {
            config.python = python.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache.dir = Some(dir.clone());
        }
    }
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InstallerError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| InstallerError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the given layers into a typed, validated configuration.
pub fn load_layers(paths: &[&PathBuf]) -> Result<InstallerConfig> {
    let mut layers = Vec::new();
    for path in paths {
        debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);
    let config: InstallerConfig =
        serde_yaml::from_value(merged).map_err(|e| InstallerError::ConfigParseError {
            path: paths
                .last()
                .map(|p| p.to_path_buf())
                .unwrap_or_default(),
            message: format!("Failed to parse merged config: {}", e),
        })?;

    validate(&config)?;
    Ok(config)
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging
/// (and it must exist). Otherwise discovers and merges all config files.
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<InstallerConfig> {
    match config_override {
        Some(path) => {
            let path = path.to_path_buf();
            load_layers(&[&path])
        }
        None => {
            let paths = ConfigPaths::discover(working_dir);
            load_layers(&paths.all_existing())
        }
    }
}
