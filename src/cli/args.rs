//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::platform::PlatformFamily;

/// toolstrap - Detect and install the development toolchains a workspace needs.
#[derive(Debug, Parser)]
#[command(name = "toolstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.toolstrap/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bootstrap home directory (overrides the stored one)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Directory holding config.yml and store.yml
    #[arg(long, global = true, env = "TOOLSTRAP_STATE_DIR", hide_env_values = true)]
    pub state_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which tools are installed (default if no command specified)
    Status(StatusArgs),

    /// Install every missing tool, in platform order
    Bootstrap(BootstrapArgs),

    /// Remove and reinstall one tool
    Install(InstallArgs),

    /// List every tool's expected footprint paths
    Paths,

    /// Show the resolved tool order
    Order(OrderArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `bootstrap` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BootstrapArgs {
    /// Keep going after a tool fails, then report every failure
    #[arg(long)]
    pub continue_on_failure: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Tool to install (python, node, cmake, homebrew, git, conda, win)
    pub tool: String,
}

/// Arguments for the `order` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OrderArgs {
    /// Platform family to resolve for (defaults to the current one)
    #[arg(long)]
    pub platform: Option<PlatformFamily>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "toolstrap",
            "bootstrap",
            "--home",
            "/opt/ts",
            "--continue-on-failure",
            "--quiet",
        ]);
        assert_eq!(cli.home, Some(PathBuf::from("/opt/ts")));
        assert!(cli.quiet);
        match cli.command {
            Some(Commands::Bootstrap(args)) => assert!(args.continue_on_failure),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_order_platform() {
        let cli = Cli::parse_from(["toolstrap", "order", "--platform", "win32"]);
        match cli.command {
            Some(Commands::Order(args)) => {
                assert_eq!(args.platform, Some(PlatformFamily::Windows))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn install_requires_tool() {
        assert!(Cli::try_parse_from(["toolstrap", "install"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["toolstrap"]);
        assert!(cli.command.is_none());
    }
}
