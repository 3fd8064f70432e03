//! Configuration schema.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration for the PyVOL backend.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shell::{resolve_tool_path, Platform};

/// Version of this control surface. Compared against the version the
/// installed backend declares it expects.
pub const GUI_VERSION: &str = "1.1.0";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Name shown in titles and button labels.
    pub display_name: String,

    /// Python interpreter whose `pip` manages the backend.
    pub python: PathBuf,

    /// Backend package settings.
    pub backend: BackendConfig,

    /// Native dependency settings.
    pub dependency: DependencyConfig,

    /// Local distribution cache settings.
    pub cache: CacheConfig,

    /// Libraries whose versions are reported but never gate anything.
    pub advisory_packages: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            display_name: "PyVOL".to_string(),
            python: default_python(),
            backend: BackendConfig::default(),
            dependency: DependencyConfig::default(),
            cache: CacheConfig::default(),
            advisory_packages: [
                "biopython",
                "numpy",
                "pandas",
                "scipy",
                "scikit-learn",
                "trimesh",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl InstallerConfig {
    /// Resolved cache directory (configured or the per-user default).
    pub fn cache_dir(&self) -> PathBuf {
        self.cache
            .dir
            .clone()
            .unwrap_or_else(default_cache_dir)
    }

    /// Conda executable used to provision the native dependency.
    ///
    /// Prefers a `conda` next to the configured interpreter (the active
    /// conda environment), then `conda` on PATH, then the bare name.
    pub fn conda_executable(&self) -> PathBuf {
        if let Some(explicit) = &self.dependency.conda.executable {
            return explicit.clone();
        }
        let platform = Platform::current();
        if let Some(dir) = self.python_dir() {
            let sibling = dir.join(platform.executable_file_name("conda"));
            if sibling.is_file() {
                return sibling;
            }
        }
        resolve_tool_path("conda", &crate::shell::parse_system_path())
            .unwrap_or_else(|| PathBuf::from("conda"))
    }

    /// Directory holding the interpreter, if the interpreter is a path.
    pub fn python_dir(&self) -> Option<&Path> {
        self.python
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// The managed backend package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Distribution name on the package index.
    pub package: String,

    /// Importable top-level module.
    pub module: String,

    /// Module attribute declaring the GUI version the backend expects.
    pub gui_version_attribute: String,

    /// Module exposing the host commands.
    pub interface_module: String,

    /// Commands registered with the host after install.
    pub host_commands: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            package: "bio-pyvol".to_string(),
            module: "pyvol".to_string(),
            gui_version_attribute: "__guiversion__".to_string(),
            interface_module: "pyvol.pymol_interface".to_string(),
            host_commands: vec!["pocket".to_string(), "load_pocket".to_string()],
        }
    }
}

/// The native executable the backend shells out to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Executable name searched on PATH.
    pub executable: String,

    /// System-level package manager used to provision it.
    pub conda: CondaConfig,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            executable: "msms".to_string(),
            conda: CondaConfig::default(),
        }
    }
}

/// Conda provisioning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondaConfig {
    /// Explicit conda executable; discovered when unset.
    pub executable: Option<PathBuf>,

    /// Channel to install from.
    pub channel: String,

    /// Package name in the channel.
    pub package: String,
}

impl Default for CondaConfig {
    fn default() -> Self {
        Self {
            executable: None,
            channel: "bioconda".to_string(),
            package: "msms".to_string(),
        }
    }
}

/// Local distribution cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory; the per-user data directory when unset.
    pub dir: Option<PathBuf>,

    /// Regular expression matched against file names in the cache.
    pub pattern: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            pattern: "^bio_pyvol".to_string(),
        }
    }
}

fn default_python() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("python")
    } else {
        PathBuf::from("python3")
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pyvol-installer")
        .join("cached_source")
}
