//! Console output for both interactive and headless runs.

use console::Term;
use std::io::Write;

use crate::error::Result;
use crate::presenter::VersionLine;

use super::{
    failure_tail, prompt_confirm, should_use_colors, InstallerTheme, OutputMode, ProgressSpinner,
    Prompt, PromptAnswers, SpinnerHandle, UserInterface,
};

/// Writes to the console; errors and warnings go to stderr.
///
/// Interactive instances ask prompts with dialoguer. Headless instances
/// answer them from [`PromptAnswers`] and never animate.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: InstallerTheme,
    mode: OutputMode,
    answers: Option<PromptAnswers>,
}

impl TerminalUI {
    /// An interactive UI on the attached terminal.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            InstallerTheme::new()
        } else {
            InstallerTheme::plain()
        };
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            answers: None,
        }
    }

    /// A plain, prompt-free UI for CI and pipes.
    pub fn headless(mode: OutputMode, answers: PromptAnswers) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: InstallerTheme::plain(),
            mode,
            answers: Some(answers),
        }
    }

    fn out(&self, line: impl std::fmt::Display) {
        writeln!(&self.out, "{}", line).ok();
    }

    fn err(&self, line: impl std::fmt::Display) {
        writeln!(&self.err, "{}", line).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.out(msg);
    }

    fn success(&mut self, msg: &str) {
        self.out(self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        self.err(self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        self.err(self.theme.format_error(msg));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        match &self.answers {
            Some(answers) => answers.answer(prompt),
            None => prompt_confirm(prompt, &self.out),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.answers.is_none() && self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        self.out(format!("\n{}\n", self.theme.format_header(title)));
    }

    fn show_versions(&mut self, lines: &[VersionLine]) {
        if !self.mode.shows_details() {
            return;
        }
        let width = lines.iter().map(|l| l.label.len()).max().unwrap_or(0) + 1;
        for line in lines {
            let label = format!("{}:", line.label);
            self.out(format!(
                "  {} {}",
                self.theme.key.apply_to(format!("{:<width$}", label)),
                self.theme.format_tone(&line.value, line.tone)
            ));
        }
        self.out("");
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_details() {
            self.out(format!("  {}", self.theme.hint.apply_to(hint)));
        }
    }

    fn show_command_failure(&mut self, command: &str, output: &str, hint: Option<&str>) {
        let bar = self.theme.border.apply_to("│");
        self.err(format!("    {}", self.theme.command.apply_to(format!("$ {}", command))));

        let (lines, cut) = failure_tail(output, self.mode);
        if cut > 0 {
            self.err(format!(
                "    {} {}",
                bar,
                self.theme
                    .border
                    .apply_to(format!("... {} earlier lines (--verbose shows all)", cut))
            ));
        }
        for line in lines {
            self.err(format!("    {} {}", bar, line));
        }
        if let Some(h) = hint {
            self.err(format!("    {} {}", self.theme.hint.apply_to("Hint:"), h));
        }
    }

    fn is_interactive(&self) -> bool {
        self.answers.is_none() && self.out.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(TerminalUI::headless(mode, PromptAnswers::from_env()))
    }
}
