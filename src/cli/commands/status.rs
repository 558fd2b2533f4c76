//! Status command implementation.
//!
//! The `toolstrap status` command detects every tool and shows the result.

use crate::cli::args::StatusArgs;
use crate::error::{BootstrapError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Exit code when one or more tools are missing.
pub const MISSING_EXIT_CODE: i32 = 2;

/// The status command implementation.
pub struct StatusCommand {
    context: CommandContext,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: CommandContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut orchestrator, _) = self.context.orchestrator()?;
        orchestrator.init()?;
        let status = orchestrator.status();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(status).map_err(|e| BootstrapError::Other(e.into()))?;
            ui.data(&json);
        } else {
            ui.show_header(&format!(
                "Tools ({}, home {})",
                orchestrator.platform(),
                orchestrator.home().display()
            ));
            for (name, installed) in status.iter() {
                ui.show_tool_status(name, installed);
            }

            if orchestrator.all_installed() {
                ui.message("");
                ui.success("All tools installed");
            } else {
                ui.message("");
                ui.message(&format!(
                    "Run `toolstrap bootstrap` to install: {}",
                    status.missing().join(", ")
                ));
            }
        }

        if orchestrator.all_installed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(MISSING_EXIT_CODE))
        }
    }
}
