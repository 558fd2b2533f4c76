//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and resolves the shared
//! [`CommandContext`] once from the global flags.

pub mod bootstrap;
pub mod dispatcher;
pub mod install;
pub mod order;
pub mod paths;
pub mod status;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
