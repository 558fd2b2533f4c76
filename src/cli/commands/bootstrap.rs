//! Bootstrap command implementation.
//!
//! The `toolstrap bootstrap` command installs every missing tool, in
//! platform order, streaming installer output as it arrives.

use crate::cli::args::BootstrapArgs;
use crate::config::FailurePolicy;
use crate::error::{BootstrapError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The bootstrap command implementation.
pub struct BootstrapCommand {
    context: CommandContext,
    args: BootstrapArgs,
}

impl BootstrapCommand {
    /// Create a new bootstrap command.
    pub fn new(context: CommandContext, args: BootstrapArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &BootstrapArgs {
        &self.args
    }
}

impl Command for BootstrapCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut orchestrator, _) = self.context.orchestrator()?;
        if self.args.continue_on_failure {
            orchestrator = orchestrator.with_failure_policy(FailurePolicy::Continue);
        }

        let home = orchestrator.home().to_path_buf();
        ui.show_header(&format!("Bootstrapping into {}", home.display()));

        let result = orchestrator.bootstrap(&home, &mut |chunk| ui.command_output(&chunk.cleaned));

        match result {
            Ok(report) => {
                for warning in &report.warnings {
                    ui.warning(warning);
                }
                for name in &report.skipped {
                    ui.skipped(&format!("{} already installed", name));
                }
                for name in &report.installed {
                    ui.success(&format!("{} installed", name));
                }
                ui.message("");
                ui.success("All tools installed");
                Ok(CommandResult::success())
            }
            Err(BootstrapError::NoInstaller { tool }) => {
                ui.error(&format!("{} is missing and has no installer", tool));
                ui.message(&format!(
                    "Add `tools.{}.install` to {}",
                    tool,
                    self.context.state_dir().join("config.yml").display()
                ));
                Ok(CommandResult::failure(1))
            }
            Err(e @ BootstrapError::InstallFailed { .. })
            | Err(e @ BootstrapError::BootstrapIncomplete { .. }) => {
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{state_with_installers, state_with_markers};
    use crate::store::ConfigStore;
    use crate::tools::ToolKind;
    use crate::ui::MockUI;

    #[test]
    fn installs_missing_tools_and_stores_home() {
        let (temp, ctx) = state_with_installers(&["python", "git"], &[], "");
        let mut ui = MockUI::new();

        let result = BootstrapCommand::new(ctx, BootstrapArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(temp.path().join("markers").join("conda").exists());
        assert!(ui.skipped_items().iter().any(|m| m.starts_with("python")));
        assert!(ui.successes().iter().any(|m| m == "node installed"));

        let store = ConfigStore::load(temp.path().join("store.yml")).unwrap();
        assert_eq!(store.home(), Some(temp.path().join("home")));
        assert!(temp.path().join("home").join("bin").is_dir());
    }

    #[test]
    fn unwritable_home_is_a_warning() {
        let (temp, ctx) = state_with_markers(&ToolKind::ALL.map(|k| k.name()), "");
        std::fs::write(temp.path().join("home"), "").unwrap();
        let mut ui = MockUI::new();

        let result = BootstrapCommand::new(ctx, BootstrapArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui
            .warnings()
            .iter()
            .any(|w| w.contains("Could not create working directory")));
        assert!(ui.successes().iter().any(|m| m == "All tools installed"));
    }

    #[test]
    fn missing_installer_is_reported() {
        let (_temp, ctx) = state_with_markers(&[], "");
        let mut ui = MockUI::new();

        let result = BootstrapCommand::new(ctx, BootstrapArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors().iter().any(|m| m.contains("no installer")));
    }

    #[test]
    fn continue_on_failure_installs_the_rest() {
        let (temp, ctx) = state_with_installers(&[], &["node"], "");
        let mut ui = MockUI::new();

        let result = BootstrapCommand::new(
            ctx,
            BootstrapArgs {
                continue_on_failure: true,
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors().iter().any(|m| m.contains("node")));
        assert!(temp.path().join("markers").join("conda").exists());
    }

    #[test]
    fn abort_stops_before_later_tools() {
        let (temp, ctx) = state_with_installers(&[], &["node"], "");
        let mut ui = MockUI::new();

        let result = BootstrapCommand::new(ctx, BootstrapArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(!temp.path().join("markers").join("conda").exists());
    }
}
