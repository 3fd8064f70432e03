//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures mean "state unknown" and are never folded into
//!   "not installed" or "up to date"
//! - Action failures carry the captured package manager output so the
//!   user can see what went wrong; they are never retried automatically
//! - Activation failures are non-fatal and usually mean a host restart
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An inventory or update query could not be completed.
    #[error("Could not determine {probe}: {message}")]
    ProbeFailure { probe: String, message: String },

    /// A mutating package manager operation exited with an error.
    #[error("{action} failed ({command}, exit code {code:?})")]
    ActionFailure {
        action: String,
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// The backend is installed but its commands could not be registered live.
    #[error("Backend installed but not activated: {message}")]
    ActivationFailure { message: String },

    /// Install from cache was requested but no archive is cached.
    #[error("No cached distribution found in {dir}")]
    NoCachedArchive { dir: PathBuf },

    /// The requested action is not legal in the current installation phase.
    #[error("{action} is not available while {phase}")]
    ActionNotAvailable { action: String, phase: String },

    /// Another reconciliation or action is still running.
    #[error("Another operation is already in progress")]
    Busy,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Captured process output for action failures, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            InstallerError::ActionFailure { output, .. } if !output.trim().is_empty() => {
                Some(output.as_str())
            }
            _ => None,
        }
    }

    /// Whether this error leaves the installation state undetermined.
    pub fn is_probe_failure(&self) -> bool {
        matches!(self, InstallerError::ProbeFailure { .. })
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
