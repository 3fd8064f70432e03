//! Local source-archive cache.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{InstallerError, Result};

/// Looks for a distributable archive in one directory.
#[derive(Debug, Clone)]
pub struct CacheProbe {
    dir: PathBuf,
    pattern: Regex,
}

impl CacheProbe {
    /// Create a probe for `dir` matching file names against `pattern`.
    pub fn new(dir: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| InstallerError::ConfigValidationError {
            message: format!("cache.pattern: {}", e),
        })?;
        Ok(Self {
            dir: dir.into(),
            pattern,
        })
    }

    /// The directory being inspected.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First matching archive by file name, or `None` when the directory
    /// is absent, unreadable, or holds no match.
    pub fn probe(&self) -> Option<PathBuf> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cache dir {} not readable: {}", self.dir.display(), e);
                return None;
            }
        };

        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.pattern.is_match(name))
            })
            .map(|entry| entry.path())
            .collect();
        matches.sort();

        let found = matches.into_iter().next();
        if let Some(path) = &found {
            debug!("Cached archive: {}", path.display());
        }
        found
    }
}
