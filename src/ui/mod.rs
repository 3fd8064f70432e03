//! Console output and prompts.
//!
//! Commands talk to a [`UserInterface`]. [`TerminalUI`] writes to the
//! console, prompting with dialoguer or, when headless, answering from
//! [`PromptAnswers`]. [`MockUI`] records what was shown for tests.
//!
//! # Example
//!
//! ```
//! use pyvol_installer::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("PyVOL");
//! ui.success("Installed");
//! ```

pub mod answers;
pub mod mock;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use answers::PromptAnswers;
pub use mock::{CommandFailure, MockSpinner, MockUI, Shown};
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, InstallerTheme};

use crate::error::Result;
use crate::presenter::VersionLine;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show aligned "name: version" lines.
    fn show_versions(&mut self, lines: &[VersionLine]);

    /// Show a contextual hint.
    fn show_hint(&mut self, hint: &str);

    /// Show a failed package manager command with its captured output.
    fn show_command_failure(&mut self, command: &str, output: &str, hint: Option<&str>);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for environment overrides).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer used when the user just presses enter.
    pub default: bool,
}

impl Prompt {
    /// Create a confirmation prompt.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            default,
        }
    }
}

/// Output lines kept from a failed command outside verbose mode.
pub const FAILURE_TAIL_LINES: usize = 15;

/// The part of captured output worth showing, plus how many lines were cut.
///
/// pip prints its progress log before the error, so the tail is kept.
pub fn failure_tail(output: &str, mode: OutputMode) -> (Vec<&str>, usize) {
    let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    if mode == OutputMode::Verbose || lines.len() <= FAILURE_TAIL_LINES {
        return (lines, 0);
    }
    let cut = lines.len() - FAILURE_TAIL_LINES;
    (lines[cut..].to_vec(), cut)
}

/// Parse a yes/no answer given as text.
pub fn parse_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
