//! External process execution.
//!
//! Every probe and action talks to the outside world through a
//! [`CommandRunner`]. Commands are executed directly (no intermediate
//! shell) and block until the child exits.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute (a path or a name resolved on PATH).
    pub program: PathBuf,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a spec for a program with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The argument list as a single space-joined string.
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Stdout and stderr joined, for surfacing to the user.
    pub fn combined_output(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (false, false) => format!(
                "{}\n{}",
                self.stdout.trim_end(),
                self.stderr.trim_end()
            ),
        }
    }
}

/// Runs external commands.
///
/// `Err` means the command could not be started at all. A started command
/// that exits non-zero is an `Ok` result with `success == false`.
pub trait CommandRunner: Send + Sync {
    /// Execute a command to completion, capturing its output.
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Extra environment variables for every child.
    env: Vec<(OsString, OsString)>,
}

impl SystemRunner {
    /// Create a runner that inherits the current environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable for every spawned child.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandResult> {
        let start = Instant::now();
        debug!("Executing: {}", spec);

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output()?;
        let duration = start.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(
            "Finished in {:?} with exit code {:?}: {}",
            duration,
            output.status.code(),
            spec
        );

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display_joins_program_and_args() {
        let spec = CommandSpec::new("python3")
            .arg("-m")
            .args(["pip", "list", "--format=json"]);
        assert_eq!(spec.to_string(), "python3 -m pip list --format=json");
        assert_eq!(spec.args_line(), "-m pip list --format=json");
    }

    #[test]
    fn combined_output_skips_empty_streams() {
        let d = Duration::from_millis(1);
        let only_out = CommandResult::success("hello\n".into(), String::new(), d);
        assert_eq!(only_out.combined_output(), "hello");

        let only_err = CommandResult::failure(Some(1), String::new(), "boom\n".into(), d);
        assert_eq!(only_err.combined_output(), "boom");

        let both = CommandResult::failure(Some(1), "out".into(), "err".into(), d);
        assert_eq!(both.combined_output(), "out\nerr");

        let none = CommandResult::success(String::new(), " ".into(), d);
        assert_eq!(none.combined_output(), "");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let runner = SystemRunner::new();
        let result = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo hello"]))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_failure_with_stderr() {
        let runner = SystemRunner::new();
        let result = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo oops >&2; exit 3"]))
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_passes_extra_env() {
        let runner = SystemRunner::new().with_env("PYVOL_TEST_VALUE", "42");
        let result = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo $PYVOL_TEST_VALUE"]))
            .unwrap();
        assert_eq!(result.stdout.trim(), "42");
    }

    #[test]
    fn system_runner_errors_when_program_missing() {
        let runner = SystemRunner::new();
        let result = runner.run(&CommandSpec::new("/nonexistent/program/for/test"));
        assert!(result.is_err());
    }
}
