//! Error types for toolstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection never returns errors: a failing check command means "not installed"
//! - Malformed check patterns are rejected when the descriptor is built
//! - Installer failures propagate to the caller of bootstrap or install
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A check pattern string is not of the form `/body/flags`.
    #[error("Invalid check pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The requested tool is not part of the resolved tool order.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// No install command has been configured for a tool.
    #[error("No installer configured for '{tool}'")]
    NoInstaller { tool: String },

    /// An installer's install or remove step failed.
    #[error("Installing '{tool}' failed: {message}")]
    InstallFailed { tool: String, message: String },

    /// Shell command could not be started or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Bootstrap finished but one or more tools could not be installed.
    #[error("Bootstrap incomplete, failed tools: {}", failed.join(", "))]
    BootstrapIncomplete { failed: Vec<String> },

    /// The home directory cannot be stored without loss.
    #[error("Home directory is not valid UTF-8: {}", path.display())]
    InvalidHome { path: PathBuf },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
