//! `python -m pip` as the backend's package manager.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{require_success, PackageManager, PackageRecord, UpdateRecord};
use crate::error::{InstallerError, Result};
use crate::shell::{CommandResult, CommandRunner, CommandSpec};

/// Pip bound to one interpreter.
#[derive(Clone)]
pub struct Pip {
    python: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Pip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pip").field("python", &self.python).finish()
    }
}

impl Pip {
    /// Create a pip client for the given interpreter.
    pub fn new(python: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            python: python.into(),
            runner,
        }
    }

    /// The interpreter this client drives.
    pub fn python(&self) -> &Path {
        &self.python
    }

    /// Run a snippet with the interpreter (`python -c <code>`).
    ///
    /// Returns the raw outcome; callers decide what a failure means.
    pub fn run_snippet(&self, code: &str) -> std::io::Result<CommandResult> {
        let spec = CommandSpec::new(&self.python).args(["-c", code]);
        self.runner.run(&spec)
    }

    fn pip(&self) -> CommandSpec {
        CommandSpec::new(&self.python).args(["-m", "pip"])
    }

    fn query<T: DeserializeOwned>(&self, probe: &str, spec: CommandSpec) -> Result<T> {
        let result = self
            .runner
            .run(&spec)
            .map_err(|e| InstallerError::ProbeFailure {
                probe: probe.to_string(),
                message: format!("could not run `{}`: {}", spec, e),
            })?;

        if !result.success {
            return Err(InstallerError::ProbeFailure {
                probe: probe.to_string(),
                message: format!(
                    "`{}` exited with code {:?}: {}",
                    spec,
                    result.exit_code,
                    result.combined_output()
                ),
            });
        }

        parse_json_listing(&result.stdout).map_err(|e| InstallerError::ProbeFailure {
            probe: probe.to_string(),
            message: format!("unparsable output from `{}`: {}", spec, e),
        })
    }

    fn mutate(&self, action: &str, spec: CommandSpec) -> Result<()> {
        info!("{}: {}", action, spec);
        let outcome = self.runner.run(&spec);
        let result = require_success(action, &spec, outcome)?;
        debug!("{} finished in {:?}", action, result.duration);
        Ok(())
    }
}

/// Parse pip's JSON listing, tolerating non-JSON noise around it.
fn parse_json_listing<T: DeserializeOwned>(stdout: &str) -> serde_json::Result<T> {
    let trimmed = stdout.trim();
    match serde_json::from_str(trimmed) {
        Ok(parsed) => Ok(parsed),
        Err(first) => {
            // Some pip builds print notices on stdout; the JSON array is
            // then on a line of its own.
            trimmed
                .lines()
                .map(str::trim)
                .filter(|l| l.starts_with('['))
                .find_map(|l| serde_json::from_str(l).ok())
                .ok_or(first)
        }
    }
}

impl PackageManager for Pip {
    fn list_installed(&self) -> Result<Vec<PackageRecord>> {
        let spec = self.pip().args(["list", "--format=json"]);
        self.query("installed packages", spec)
    }

    fn list_outdated(&self) -> Result<Vec<UpdateRecord>> {
        let spec = self.pip().args(["list", "--outdated", "--format=json"]);
        self.query("available updates", spec)
    }

    fn install(&self, name: &str) -> Result<()> {
        self.mutate("Install", self.pip().args(["install", name]))
    }

    fn install_local(&self, archive: &Path) -> Result<()> {
        let spec = self
            .pip()
            .arg("install")
            .arg(archive.to_string_lossy().to_string());
        self.mutate("Install from cache", spec)
    }

    fn uninstall(&self, name: &str) -> Result<()> {
        self.mutate("Uninstall", self.pip().args(["uninstall", "-y", name]))
    }

    fn upgrade(&self, name: &str) -> Result<()> {
        self.mutate("Update", self.pip().args(["install", "--upgrade", name]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ScriptedResponse, ScriptedRunner};

    fn pip_with(runner: &Arc<ScriptedRunner>) -> Pip {
        Pip::new("python3", runner.clone())
    }

    #[test]
    fn list_installed_parses_pip_json() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "pip list --format=json",
            ScriptedResponse::ok(
                r#"[{"name": "bio-pyvol", "version": "1.0.0"}, {"name": "numpy", "version": "1.26.4"}]"#,
            ),
        );

        let packages = pip_with(&runner).list_installed().unwrap();
        assert_eq!(
            packages,
            vec![
                PackageRecord::new("bio-pyvol", "1.0.0"),
                PackageRecord::new("numpy", "1.26.4"),
            ]
        );
        assert_eq!(runner.calls(), vec!["python3 -m pip list --format=json"]);
    }

    #[test]
    fn list_outdated_parses_latest_version() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "--outdated",
            ScriptedResponse::ok(
                r#"[{"name": "bio-pyvol", "version": "1.0.0", "latest_version": "1.1.0", "latest_filetype": "sdist"}]"#,
            ),
        );

        let updates = pip_with(&runner).list_outdated().unwrap();
        assert_eq!(updates, vec![UpdateRecord::new("bio-pyvol", "1.1.0")]);
    }

    #[test]
    fn list_tolerates_notice_lines() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "pip list",
            ScriptedResponse::ok("[notice] something\n[{\"name\": \"numpy\", \"version\": \"2.0\"}]\n"),
        );

        let packages = pip_with(&runner).list_installed().unwrap();
        assert_eq!(packages, vec![PackageRecord::new("numpy", "2.0")]);
    }

    #[test]
    fn unparsable_listing_is_a_probe_failure() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("pip list", ScriptedResponse::ok("Package Version\n------- -------"));

        let err = pip_with(&runner).list_installed().unwrap_err();
        assert!(err.is_probe_failure());
        assert!(err.to_string().contains("unparsable"));
    }

    #[test]
    fn missing_interpreter_is_a_probe_failure() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("pip list", ScriptedResponse::spawn_error("no such file"));

        let err = pip_with(&runner).list_installed().unwrap_err();
        assert!(err.is_probe_failure());
    }

    #[test]
    fn failed_outdated_query_is_a_probe_failure() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("--outdated", ScriptedResponse::fail(2, "network unreachable"));

        let err = pip_with(&runner).list_outdated().unwrap_err();
        assert!(err.is_probe_failure());
        assert!(err.to_string().contains("network unreachable"));
    }

    #[test]
    fn mutating_commands_use_expected_arguments() {
        let runner = Arc::new(ScriptedRunner::new());
        let pip = pip_with(&runner);

        pip.install("bio-pyvol").unwrap();
        pip.install_local(Path::new("/cache/bio_pyvol-1.1.0.tar.gz"))
            .unwrap();
        pip.uninstall("bio-pyvol").unwrap();
        pip.upgrade("bio-pyvol").unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "python3 -m pip install bio-pyvol",
                "python3 -m pip install /cache/bio_pyvol-1.1.0.tar.gz",
                "python3 -m pip uninstall -y bio-pyvol",
                "python3 -m pip install --upgrade bio-pyvol",
            ]
        );
    }

    #[test]
    fn mutating_failure_carries_output() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on(
            "pip install --upgrade",
            ScriptedResponse::fail(1, "ERROR: Could not find a version"),
        );

        let err = pip_with(&runner).upgrade("bio-pyvol").unwrap_err();
        assert_eq!(
            err.captured_output(),
            Some("ERROR: Could not find a version")
        );
    }

    #[test]
    fn run_snippet_passes_code_verbatim() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("-c import pyvol", ScriptedResponse::ok("1.1.0\n"));

        let result = pip_with(&runner).run_snippet("import pyvol").unwrap();
        assert_eq!(result.stdout.trim(), "1.1.0");
    }
}
