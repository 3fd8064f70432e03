//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning any
//! process. Responses are matched against the rendered command line and
//! every invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use pyvol_installer::shell::{CommandRunner, CommandSpec, ScriptedResponse, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.on("pip list", ScriptedResponse::ok("[]"));
//!
//! let result = runner
//!     .run(&CommandSpec::new("python3").args(["-m", "pip", "list"]))
//!     .unwrap();
//! assert!(result.success);
//! assert!(runner.was_called("pip list"));
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// A canned outcome for a scripted command.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Exit 0 with the given stdout.
    Ok(String),
    /// Exit with a non-zero code and the given stderr.
    Fail { code: i32, stderr: String },
    /// The program could not be started.
    SpawnError(String),
}

impl ScriptedResponse {
    /// Successful response with stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::Ok(stdout.into())
    }

    /// Failed response with exit code and stderr.
    pub fn fail(code: i32, stderr: impl Into<String>) -> Self {
        Self::Fail {
            code,
            stderr: stderr.into(),
        }
    }

    /// Response for a program that cannot be launched.
    pub fn spawn_error(message: impl Into<String>) -> Self {
        Self::SpawnError(message.into())
    }
}

#[derive(Debug)]
struct Rule {
    pattern: String,
    responses: VecDeque<ScriptedResponse>,
}

/// Command runner that replays scripted responses.
///
/// Rules are matched in registration order; the first rule whose pattern
/// is a substring of the rendered command wins. A rule holding several
/// responses pops them in order and keeps repeating the last one.
/// Unmatched commands succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    /// Create a runner with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to commands containing `pattern`.
    pub fn on(&self, pattern: &str, response: ScriptedResponse) -> &Self {
        self.on_sequence(pattern, vec![response])
    }

    /// Respond to successive matching calls with successive responses.
    pub fn on_sequence(&self, pattern: &str, responses: Vec<ScriptedResponse>) -> &Self {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push(Rule {
                pattern: pattern.to_string(),
                responses: responses.into(),
            });
        }
        self
    }

    /// All rendered command lines executed so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Whether any executed command contained `pattern`.
    pub fn was_called(&self, pattern: &str) -> bool {
        self.calls().iter().any(|c| c.contains(pattern))
    }

    /// Number of executed commands containing `pattern`.
    pub fn call_count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(pattern)).count()
    }

    fn next_response(&self, line: &str) -> Option<ScriptedResponse> {
        let mut rules = self.rules.lock().ok()?;
        let rule = rules.iter_mut().find(|r| line.contains(&r.pattern))?;
        if rule.responses.len() > 1 {
            rule.responses.pop_front()
        } else {
            rule.responses.front().cloned()
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandResult> {
        let line = spec.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        let elapsed = Duration::from_millis(1);
        match self.next_response(&line) {
            None => Ok(CommandResult::success(String::new(), String::new(), elapsed)),
            Some(ScriptedResponse::Ok(stdout)) => {
                Ok(CommandResult::success(stdout, String::new(), elapsed))
            }
            Some(ScriptedResponse::Fail { code, stderr }) => Ok(CommandResult::failure(
                Some(code),
                String::new(),
                stderr,
                elapsed,
            )),
            Some(ScriptedResponse::SpawnError(message)) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                message,
            )),
        }
    }
}
