//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Tool overrides must name a known tool
//! - Checks must be well formed and their patterns must compile
//! - Commands must not be blank

use crate::config::schema::ToolstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::tools::ToolKind;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Tool name if error is tool-specific
    pub tool: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &ToolstrapConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, tool) in &config.tools {
        if name.parse::<ToolKind>().is_err() {
            errors.push(ValidationError {
                rule: "unknown-tool".to_string(),
                message: format!("Tool '{}' is not a known tool", name),
                tool: Some(name.clone()),
            });
            continue;
        }

        if let Some(check) = &tool.check {
            if let Err(e) = check.to_strategy(name) {
                errors.push(ValidationError {
                    rule: "invalid-check".to_string(),
                    message: e.to_string(),
                    tool: Some(name.clone()),
                });
            }
        }

        for (field, command) in [("install", &tool.install), ("remove", &tool.remove)] {
            if command.as_deref().is_some_and(|c| c.trim().is_empty()) {
                errors.push(ValidationError {
                    rule: "empty-command".to_string(),
                    message: format!("Tool '{}' has an empty '{}' command", name, field),
                    tool: Some(name.clone()),
                });
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ToolstrapConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BootstrapError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
