//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the state shared by every command
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::config::{load_config, resolve_home, validate, ToolstrapConfig};
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::store::{state_dir, ConfigStore};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Locations every command resolves its config, store, and home from.
#[derive(Debug, Clone)]
pub struct CommandContext {
    state_dir: PathBuf,
    config_path: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            state_dir,
            config_path: None,
            home: None,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Load and validate the config.
    pub fn config(&self) -> Result<ToolstrapConfig> {
        let config = load_config(&self.state_dir, self.config_path.as_deref())?;
        validate(&config)?;
        Ok(config)
    }

    /// Load the persistent store.
    pub fn store(&self) -> Result<ConfigStore> {
        ConfigStore::load(self.state_dir.join("store.yml"))
    }

    /// Build an orchestrator rooted at the resolved home.
    pub fn orchestrator(&self) -> Result<(Orchestrator, ToolstrapConfig)> {
        let config = self.config()?;
        let store = self.store()?;
        let home = resolve_home(self.home.as_deref(), &store, &config);
        tracing::debug!("Using home {}", home.display());
        Ok((Orchestrator::from_config(home, store, &config), config))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a dispatcher from parsed global flags.
    pub fn new(cli: &Cli) -> Self {
        let context = CommandContext::new(cli.state_dir.clone().unwrap_or_else(state_dir))
            .with_config_path(cli.config.clone())
            .with_home(cli.home.clone());
        Self { context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context.clone();
        match &cli.command {
            Some(Commands::Status(args)) => {
                super::status::StatusCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Bootstrap(args)) => {
                super::bootstrap::BootstrapCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Paths) => super::paths::PathsCommand::new(ctx).execute(ui),
            Some(Commands::Order(args)) => {
                super::order::OrderCommand::new(ctx, args.clone()).execute(ui)
            }
            None => super::status::StatusCommand::new(ctx, StatusArgs::default()).execute(ui),
        }
    }
}
