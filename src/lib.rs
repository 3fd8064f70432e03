//! pyvol-installer - Installation-state reconciliation for the PyVOL backend.
//!
//! The crate inspects a Python environment, decides which installation phase
//! it is in and which actions are legal, and carries out install, uninstall
//! and update against pip, conda and a local distribution cache.
//!
//! # Modules
//!
//! - [`actions`] - Install, uninstall and update with their notices
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`controller`] - Message-driven control loop with an in-flight guard
//! - [`error`] - Error types and result aliases
//! - [`host`] - Activating the backend's commands in the host
//! - [`logging`] - Tracing subscriber setup
//! - [`package_manager`] - pip and conda clients
//! - [`presenter`] - Status view derived from a reconciled state
//! - [`probes`] - Read-only inspection of the environment
//! - [`reconcile`] - Pure state reconciliation and the legality rules
//! - [`shell`] - Process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use pyvol_installer::config::InstallerConfig;
//! use pyvol_installer::probes::{DependencyStatus, Presence};
//! use pyvol_installer::reconcile::{reconcile, InstallPhase, ProbeSnapshot, Tracked};
//!
//! let tracked = Tracked::from_config(&InstallerConfig::default());
//! let snapshot = ProbeSnapshot {
//!     packages: Vec::new(),
//!     dependency: DependencyStatus::missing("msms"),
//!     outdated: None,
//!     declared_gui_version: Presence::Absent,
//!     cache_archive: None,
//! };
//!
//! let state = reconcile(&snapshot, &tracked);
//! assert_eq!(state.phase, InstallPhase::NotInstalled);
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod logging;
pub mod package_manager;
pub mod presenter;
pub mod probes;
pub mod reconcile;
pub mod shell;
pub mod ui;

pub use error::{InstallerError, Result};
