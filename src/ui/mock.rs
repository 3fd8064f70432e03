//! Mock UI implementation for testing.
//!
//! `MockUI` records everything shown as a [`Shown`] event, in order, and
//! answers prompts from pre-set responses.
//!
//! # Example
//!
//! ```
//! use pyvol_installer::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("uninstall", "yes");
//!
//! ui.message("Checking installation");
//! assert!(ui.confirm(&Prompt::confirm("uninstall", "Uninstall?", false)).unwrap());
//!
//! assert!(ui.has_message("Checking"));
//! assert_eq!(ui.prompts_shown(), ["uninstall"]);
//! ```

use std::collections::HashMap;

use crate::error::Result;
use crate::presenter::VersionLine;

use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// One thing the mock was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Header(String),
    Hint(String),
    Versions(Vec<VersionLine>),
    Spinner(String),
    Failure(CommandFailure),
}

/// A failed command as handed to [`UserInterface::show_command_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    pub command: String,
    pub output: String,
    pub hint: Option<String>,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    shown: Vec<Shown>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Everything shown, in order.
    pub fn shown(&self) -> &[Shown] {
        &self.shown
    }

    fn texts(&self, pick: fn(&Shown) -> Option<&String>) -> Vec<&str> {
        self.shown.iter().filter_map(pick).map(String::as_str).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Success(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Error(m) => Some(m),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Header(m) => Some(m),
            _ => None,
        })
    }

    pub fn hints(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Hint(m) => Some(m),
            _ => None,
        })
    }

    pub fn spinners(&self) -> Vec<&str> {
        self.texts(|s| match s {
            Shown::Spinner(m) => Some(m),
            _ => None,
        })
    }

    /// Every version line shown, across calls.
    pub fn versions(&self) -> Vec<&VersionLine> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Versions(lines) => Some(lines.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every command failure shown.
    pub fn failures(&self) -> Vec<&CommandFailure> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Failure(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    /// Keys of all prompts that were asked.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages().iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes().iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors().iter().any(|m| m.contains(msg))
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints().iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.shown.push(Shown::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.shown.push(Shown::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.shown.push(Shown::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.shown.push(Shown::Error(msg.to_string()));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.prompts_shown.push(prompt.key.clone());
        Ok(self
            .prompt_responses
            .get(&prompt.key)
            .and_then(|r| parse_answer(r))
            .unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.shown.push(Shown::Spinner(message.to_string()));
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.shown.push(Shown::Header(title.to_string()));
    }

    fn show_versions(&mut self, lines: &[VersionLine]) {
        self.shown.push(Shown::Versions(lines.to_vec()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.shown.push(Shown::Hint(hint.to_string()));
    }

    fn show_command_failure(&mut self, command: &str, output: &str, hint: Option<&str>) {
        self.shown.push(Shown::Failure(CommandFailure {
            command: command.to_string(),
            output: output.to_string(),
            hint: hint.map(str::to_string),
        }));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that remembers how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    outcome: Option<(bool, String)>,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages set while spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `(succeeded, final message)` once finished.
    pub fn outcome(&self) -> Option<(bool, &str)> {
        self.outcome.as_ref().map(|(ok, msg)| (*ok, msg.as_str()))
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.outcome = Some((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcome = Some((false, msg.to_string()));
    }
}
