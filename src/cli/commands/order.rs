//! Order command implementation.
//!
//! The `toolstrap order` command prints the resolved install sequence.

use crate::cli::args::OrderArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The order command implementation.
pub struct OrderCommand {
    context: CommandContext,
    args: OrderArgs,
}

impl OrderCommand {
    pub fn new(context: CommandContext, args: OrderArgs) -> Self {
        Self { context, args }
    }

    pub fn args(&self) -> &OrderArgs {
        &self.args
    }
}

impl Command for OrderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut orchestrator, _) = self.context.orchestrator()?;
        if let Some(platform) = self.args.platform {
            orchestrator = orchestrator.with_platform(platform);
        }

        ui.show_header(&format!("Install order ({})", orchestrator.platform()));
        for (i, tool) in orchestrator.resolve()?.iter().enumerate() {
            ui.data(&format!("{}. {} ({})", i + 1, tool.name, tool.check.kind()));
        }
        Ok(CommandResult::success())
    }
}
