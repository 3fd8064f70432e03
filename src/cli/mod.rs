//! Command-line surface: [`args`] holds the clap definitions, [`commands`]
//! turns a parsed [`Cli`] into controller messages.

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, InstallArgs, NextArgs, StatusArgs, UninstallArgs, UpdateArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, InstallerContext};
