//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once, wires an [`InstallerContext`] and routes the CLI
//! subcommand to its implementation. Every command except `completions`
//! talks to the installation only through the context's controller.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod install;
pub mod next;
pub mod status;
pub mod uninstall;
pub mod update;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, InstallerContext, EXIT_ACTION_FAILED,
    EXIT_STATUS_UNKNOWN,
};
