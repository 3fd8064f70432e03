//! Prompt answers for runs without a terminal.

use std::collections::HashMap;

use crate::error::{InstallerError, Result};

use super::{parse_answer, Prompt};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "PYVOL_PROMPT_";

/// Answers keyed by `PYVOL_PROMPT_<KEY>`.
///
/// A prompt without an answer takes its default.
#[derive(Debug, Clone, Default)]
pub struct PromptAnswers {
    answers: HashMap<String, String>,
}

impl PromptAnswers {
    pub fn new(answers: HashMap<String, String>) -> Self {
        Self { answers }
    }

    /// Collect answers from the process environment.
    pub fn from_env() -> Self {
        Self::new(
            std::env::vars()
                .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
                .collect(),
        )
    }

    /// The variable that answers `prompt`.
    pub fn env_key(prompt: &Prompt) -> String {
        format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase())
    }

    pub fn answer(&self, prompt: &Prompt) -> Result<bool> {
        let key = Self::env_key(prompt);
        match self.answers.get(&key) {
            Some(value) => {
                parse_answer(value).ok_or_else(|| InstallerError::ConfigValidationError {
                    message: format!("{} must be yes or no, got '{}'", key, value),
                })
            }
            None => Ok(prompt.default),
        }
    }
}
