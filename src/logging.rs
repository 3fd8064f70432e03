//! Logging setup.
//!
//! [`init`] is called once at process start and returns a [`LogGuard`];
//! the guard must live until the process ends so buffered file output is
//! flushed when it drops.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{InstallerError, Result};

/// How logging should be set up.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Force debug output for this crate.
    pub debug: bool,
    /// Also append logs to this file.
    pub log_file: Option<PathBuf>,
}

/// Keeps the file writer alive. Flushes on drop.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Build the level filter.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("pyvol_installer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pyvol_installer=info"))
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?
        .to_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, file_name))
}

/// Console filter: warnings only, unless `--debug` or `RUST_LOG` asks for more.
fn console_filter(debug: bool) -> EnvFilter {
    if debug || std::env::var_os("RUST_LOG").is_some() {
        filter(debug)
    } else {
        EnvFilter::new("pyvol_installer=warn")
    }
}

/// Install the global subscriber.
///
/// Console output goes to stderr so stdout stays clean for `--json`. The
/// log file, when given, records at [`filter`] level.
pub fn init(options: &LogOptions) -> Result<LogGuard> {
    let (file_layer, guard) = match &options.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter(options.debug));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter(options.debug)),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| InstallerError::Other(anyhow!("failed to initialise logging: {}", e)))?;

    Ok(LogGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_overrides_environment() {
        assert_eq!(filter(true).to_string(), "pyvol_installer=debug");
    }

    #[test]
    fn console_follows_debug_flag() {
        assert_eq!(console_filter(true).to_string(), "pyvol_installer=debug");
    }

    #[test]
    fn log_path_is_split_into_dir_and_name() {
        let (dir, name) = split_log_path(Path::new("/var/log/pyvol/installer.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/pyvol"));
        assert_eq!(name, "installer.log");

        let (dir, name) = split_log_path(Path::new("installer.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "installer.log");
    }

    #[test]
    fn log_path_without_file_name_is_rejected() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
