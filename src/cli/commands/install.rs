//! Install command implementation.
//!
//! The `toolstrap install <tool>` command removes and reinstalls one tool,
//! whether or not it is currently detected.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::installer::InstallOptions;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    context: CommandContext,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(context: CommandContext, args: InstallArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut orchestrator, config) = self.context.orchestrator()?;
        let options = InstallOptions {
            env: config.settings.env.clone(),
        };

        ui.show_header(&format!("Installing {}", self.args.tool));
        orchestrator.install(&self.args.tool, &options, &mut |chunk| {
            ui.command_output(&chunk.cleaned)
        })?;
        ui.success(&format!("{} installed", self.args.tool));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::state_with_markers;
    use crate::error::BootstrapError;
    use crate::ui::MockUI;

    #[test]
    fn unknown_tool_is_an_error() {
        let (_temp, ctx) = state_with_markers(&[], "");
        let mut ui = MockUI::new();

        let err = InstallCommand::new(
            ctx,
            InstallArgs {
                tool: "ruby".into(),
            },
        )
        .execute(&mut ui)
        .unwrap_err();

        assert!(matches!(err, BootstrapError::UnknownTool { .. }));
    }

    #[test]
    fn tool_without_command_has_no_installer() {
        let (_temp, ctx) = state_with_markers(&[], "");
        let mut ui = MockUI::new();

        let err = InstallCommand::new(ctx, InstallArgs { tool: "git".into() })
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, BootstrapError::NoInstaller { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn reinstalls_present_tool() {
        use crate::cli::commands::test_support::state_with_installers;

        let (temp, ctx) = state_with_installers(&["git"], &[], "");
        let marker = temp.path().join("markers").join("git");
        let mut ui = MockUI::new();

        let result = InstallCommand::new(ctx, InstallArgs { tool: "git".into() })
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(marker.exists());
        assert_eq!(ui.successes(), ["git installed"]);
    }
}
