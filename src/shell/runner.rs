//! The shell-runner seam used by detection and installers.

use std::rc::Rc;

use crate::error::Result;

use super::command::{execute_streaming, CommandOptions, OutputChunk, ShellOutput};

/// Executes command lines on behalf of detection and installers.
///
/// Implementations stream every output line to `on_data` and resolve once
/// the process exits. A process that starts and exits non-zero is still
/// `Ok`; `Err` means the command could not be run at all.
pub trait ShellRunner {
    fn run(
        &self,
        command: &str,
        options: &CommandOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<ShellOutput>;
}

impl<T: ShellRunner + ?Sized> ShellRunner for Rc<T> {
    fn run(
        &self,
        command: &str,
        options: &CommandOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<ShellOutput> {
        (**self).run(command, options, on_data)
    }
}

/// [`ShellRunner`] backed by the user's shell.
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    options: CommandOptions,
}

impl SystemShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `options` (cwd, env) to every command unless the caller overrides them.
    pub fn with_options(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl ShellRunner for SystemShell {
    fn run(
        &self,
        command: &str,
        options: &CommandOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<ShellOutput> {
        let mut merged = self.options.clone();
        if options.cwd.is_some() {
            merged.cwd = options.cwd.clone();
        }
        merged
            .env
            .extend(options.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        execute_streaming(command, &merged, on_data)
    }
}
