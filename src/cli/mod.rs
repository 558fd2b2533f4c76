//! Command-line interface for toolstrap.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{BootstrapArgs, Cli, Commands, InstallArgs, OrderArgs, StatusArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
