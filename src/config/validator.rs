//! Configuration validation rules.
//!
//! - Tracked names (backend package, module, dependency executable, conda
//!   package and channel) must be non-empty
//! - The cache pattern must compile as a regular expression
//! - Host command names must be non-empty and unique

use crate::config::schema::InstallerConfig;
use crate::error::{InstallerError, Result};
use regex::Regex;
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Config key the error refers to.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &InstallerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        ("display_name", config.display_name.as_str()),
        ("backend.package", config.backend.package.as_str()),
        ("backend.module", config.backend.module.as_str()),
        ("dependency.executable", config.dependency.executable.as_str()),
        ("dependency.conda.channel", config.dependency.conda.channel.as_str()),
        ("dependency.conda.package", config.dependency.conda.package.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field: field.to_string(),
                message: format!("'{}' must not be empty", field),
            });
        }
    }

    if config.python.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "python".to_string(),
            message: "'python' must name an interpreter".to_string(),
        });
    }

    if let Err(e) = Regex::new(&config.cache.pattern) {
        errors.push(ValidationError {
            field: "cache.pattern".to_string(),
            message: format!("'cache.pattern' is not a valid regular expression: {}", e),
        });
    }

    let mut seen = HashSet::new();
    for command in &config.backend.host_commands {
        if command.trim().is_empty() {
            errors.push(ValidationError {
                field: "backend.host_commands".to_string(),
                message: "host command names must not be empty".to_string(),
            });
        } else if !seen.insert(command.as_str()) {
            errors.push(ValidationError {
                field: "backend.host_commands".to_string(),
                message: format!("host command '{}' is listed twice", command),
            });
        }
    }

    errors
}

/// Validate a configuration, failing with all messages joined.
pub fn validate(config: &InstallerConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(InstallerError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
