//! Installer driven by configured shell commands.

use crate::error::{BootstrapError, Result};
use crate::shell::{CommandOptions, OutputChunk};

use super::{InstallContext, InstallOptions, Installer};

/// Runs a configured command to install and another to remove.
///
/// Commands run in the working directory with `TOOLSTRAP_HOME` and
/// `TOOLSTRAP_BIN` set. Without a remove command, removal is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInstaller {
    install: Option<String>,
    remove: Option<String>,
}

impl CommandInstaller {
    pub fn new(install: Option<String>, remove: Option<String>) -> Self {
        Self { install, remove }
    }

    pub fn install_command(&self) -> Option<&str> {
        self.install.as_deref()
    }

    pub fn remove_command(&self) -> Option<&str> {
        self.remove.as_deref()
    }

    fn run(
        &self,
        command: &str,
        ctx: &InstallContext<'_>,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        let bin = ctx.paths.bin(&[]);
        let mut env = options.env.clone();
        env.insert(
            "TOOLSTRAP_HOME".to_string(),
            ctx.paths.home().display().to_string(),
        );
        env.insert("TOOLSTRAP_BIN".to_string(), bin.display().to_string());

        let command_options = CommandOptions {
            cwd: bin.is_dir().then_some(bin),
            env,
            interactive: true,
        };

        let output = ctx.shell.run(command, &command_options, on_data)?;
        if output.success {
            Ok(())
        } else {
            Err(BootstrapError::InstallFailed {
                tool: ctx.tool.to_string(),
                message: format!("`{}` exited with code {:?}", command, output.exit_code),
            })
        }
    }
}

impl Installer for CommandInstaller {
    fn install(
        &self,
        ctx: &InstallContext<'_>,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        let Some(command) = &self.install else {
            return Err(BootstrapError::NoInstaller {
                tool: ctx.tool.to_string(),
            });
        };
        tracing::info!("Installing {}", ctx.tool);
        self.run(command, ctx, options, on_data)
    }

    fn remove(
        &self,
        ctx: &InstallContext<'_>,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        match &self.remove {
            Some(command) => {
                tracing::info!("Removing {}", ctx.tool);
                self.run(command, ctx, options, on_data)
            }
            None => {
                tracing::debug!("No remove command for {}; nothing to do", ctx.tool);
                Ok(())
            }
        }
    }
}
