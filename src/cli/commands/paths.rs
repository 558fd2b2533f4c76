//! Paths command implementation.
//!
//! The `toolstrap paths` command lists every tool's expected footprint,
//! one path per line, in tool order.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The paths command implementation.
pub struct PathsCommand {
    context: CommandContext,
}

impl PathsCommand {
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for PathsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (mut orchestrator, _) = self.context.orchestrator()?;
        orchestrator.resolve()?;

        for path in orchestrator.modules_paths() {
            ui.data(&path.display().to_string());
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn default_config_lists_conda_under_working_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = CommandContext::new(temp.path().to_path_buf())
            .with_home(Some(temp.path().join("home")));
        let mut ui = MockUI::new();

        PathsCommand::new(ctx).execute(&mut ui).unwrap();

        assert_eq!(ui.data_lines().len(), 1);
        let bin = temp.path().join("home").join("bin");
        assert!(ui.data_lines()[0].starts_with(&bin.display().to_string()));
        assert!(ui.data_lines()[0].contains("conda"));
    }

    #[test]
    fn configured_paths_are_listed_in_order() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.yml"),
            "tools:\n  git:\n    paths: [/opt/git/bin/git]\n  conda:\n    paths: []\n",
        )
        .unwrap();
        let ctx = CommandContext::new(temp.path().to_path_buf());
        let mut ui = MockUI::new();

        PathsCommand::new(ctx).execute(&mut ui).unwrap();

        assert_eq!(ui.data_lines(), ["/opt/git/bin/git"]);
    }
}
