//! pyvol-installer CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pyvol_installer::cli::{Cli, CommandDispatcher};
use pyvol_installer::logging::{self, LogOptions};
use pyvol_installer::shell::is_ci;
use pyvol_installer::ui::{create_ui, OutputMode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&LogOptions {
        debug: cli.debug,
        log_file: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    tracing::debug!(?cli, "parsed arguments");

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }
    let mut ui = create_ui(!is_ci(), OutputMode::from_flags(cli.verbose, cli.quiet));
    let dispatcher = CommandDispatcher::new(std::env::current_dir().unwrap_or_default());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            tracing::debug!(error = ?e, "command aborted");
            ui.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
