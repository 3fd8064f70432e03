//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// pyvol-installer - Manage the PyVOL backend installation.
#[derive(Debug, Parser)]
#[command(name = "pyvol-installer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (skips config discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Python interpreter whose environment is managed
    #[arg(long, global = true, env = "PYVOL_PYTHON")]
    pub python: Option<PathBuf>,

    /// Directory holding a cached source archive
    #[arg(long, global = true, env = "PYVOL_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config overrides taken from global flags and their env fallbacks.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            python: self.python.clone(),
            cache_dir: self.cache_dir.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the installation status (default if no command specified)
    Status(StatusArgs),

    /// Install the backend
    Install(InstallArgs),

    /// Uninstall the backend
    Uninstall(UninstallArgs),

    /// Check for a newer release and upgrade to it
    Update(UpdateArgs),

    /// Perform the currently recommended action
    Next(NextArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Query the package index for a newer release
    #[arg(long)]
    pub check_updates: bool,

    /// Print the reconciled state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Install from the cached source archive instead of the package index
    #[arg(long)]
    pub from_cache: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateArgs {}

/// Arguments for the `next` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NextArgs {
    /// Skip the confirmation prompt for destructive actions
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["pyvol-installer"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn status_flags() {
        let cli =
            Cli::try_parse_from(["pyvol-installer", "status", "--check-updates", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Status(args)) => {
                assert!(args.check_updates);
                assert!(args.json);
            }
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn install_from_cache_flag() {
        let cli = Cli::try_parse_from(["pyvol-installer", "install", "--from-cache"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Install(InstallArgs { from_cache: true }))
        ));
    }

    #[test]
    fn uninstall_yes_short_flag() {
        let cli = Cli::try_parse_from(["pyvol-installer", "uninstall", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Uninstall(UninstallArgs { yes: true }))
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pyvol-installer",
            "next",
            "--python",
            "/opt/py/bin/python3",
            "--cache-dir",
            "/tmp/cache",
            "--debug",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.python, Some(PathBuf::from("/opt/py/bin/python3")));
        assert_eq!(overrides.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert!(cli.debug);
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["pyvol-installer", "completions"]).is_err());
        let cli = Cli::try_parse_from(["pyvol-installer", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Bash }))
        ));
    }
}
