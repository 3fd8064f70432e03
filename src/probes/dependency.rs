//! Native dependency lookup.
//!
//! On POSIX hosts the directory holding the configured interpreter is
//! searched after `PATH`, because conda installs into the active
//! environment's `bin` even when that directory is not on `PATH`. On other
//! hosts only `PATH` is searched.

use std::path::PathBuf;

use tracing::debug;

use super::status::DependencyStatus;
use crate::shell::{parse_system_path, resolve_tool_path, Platform};

/// Locates one executable.
#[derive(Debug, Clone)]
pub struct DependencyProbe {
    executable: String,
    extra_dirs: Vec<PathBuf>,
    path_override: Option<Vec<PathBuf>>,
    platform: Platform,
}

impl DependencyProbe {
    /// Create a probe for `executable` on the current platform.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            extra_dirs: Vec::new(),
            path_override: None,
            platform: Platform::current(),
        }
    }

    /// Also search `dir` after PATH (POSIX only).
    pub fn with_extra_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    /// Search `entries` instead of the process PATH.
    pub fn with_path(mut self, entries: Vec<PathBuf>) -> Self {
        self.path_override = Some(entries);
        self
    }

    /// Override the platform (for tests).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Name of the tracked executable.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The directories searched, in order, given a PATH listing.
    pub fn search_dirs(&self, path_entries: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut dirs = path_entries;
        if self.platform.is_posix() {
            for extra in &self.extra_dirs {
                if !dirs.contains(extra) {
                    dirs.push(extra.clone());
                }
            }
        }
        dirs
    }

    /// Search the process PATH (plus extras). Absence is a normal result.
    pub fn probe(&self) -> DependencyStatus {
        let entries = match &self.path_override {
            Some(entries) => entries.clone(),
            None => parse_system_path(),
        };
        self.probe_in(entries)
    }

    /// Search an explicit PATH listing (plus extras).
    pub fn probe_in(&self, path_entries: Vec<PathBuf>) -> DependencyStatus {
        let dirs = self.search_dirs(path_entries);
        match resolve_tool_path(&self.executable, &dirs) {
            Some(path) => {
                debug!("Found {} at {}", self.executable, path.display());
                DependencyStatus::found(&self.executable, path)
            }
            None => {
                debug!("{} not found in {} directories", self.executable, dirs.len());
                DependencyStatus::missing(&self.executable)
            }
        }
    }
}
