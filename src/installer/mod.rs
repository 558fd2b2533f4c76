//! Installer capability interface.
//!
//! An [`Installer`] knows how to put one tool on the host and how to take it
//! off again. Detection data (footprint paths, checks) lives on the tool's
//! [`ToolDescriptor`](crate::detection::ToolDescriptor); installers only act.
//!
//! # Modules
//!
//! - [`command`] - Installer that runs configured shell commands
//! - [`mock`] - Recording installer for tests

pub mod command;
pub mod mock;

pub use command::CommandInstaller;
pub use mock::{InstallerLog, RecordingInstaller};

use std::collections::HashMap;

use crate::error::Result;
use crate::paths::PathResolver;
use crate::shell::{OutputChunk, ShellRunner};

/// What an installer gets to work with.
pub struct InstallContext<'a> {
    /// Name of the tool being installed.
    pub tool: &'a str,
    /// Runner for any commands the installer needs.
    pub shell: &'a dyn ShellRunner,
    /// Path resolver rooted at the bootstrap home.
    pub paths: &'a PathResolver,
}

/// Caller-supplied install options.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Extra environment for installer commands.
    pub env: HashMap<String, String>,
}

/// Installs and removes one tool.
pub trait Installer {
    /// Install the tool, streaming progress through `on_data`.
    fn install(
        &self,
        ctx: &InstallContext<'_>,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()>;

    /// Remove any prior installation. Must succeed when nothing is installed.
    fn remove(
        &self,
        ctx: &InstallContext<'_>,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()>;
}

/// Installers keyed by tool name.
#[derive(Default)]
pub struct InstallerRegistry {
    installers: HashMap<String, Box<dyn Installer>>,
}

impl InstallerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `installer` for `tool`, replacing any previous one.
    pub fn register(&mut self, tool: &str, installer: Box<dyn Installer>) {
        self.installers.insert(tool.to_string(), installer);
    }

    pub fn with(mut self, tool: &str, installer: impl Installer + 'static) -> Self {
        self.register(tool, Box::new(installer));
        self
    }

    pub fn get(&self, tool: &str) -> Option<&dyn Installer> {
        self.installers.get(tool).map(|b| b.as_ref())
    }

    pub fn contains(&self, tool: &str) -> bool {
        self.installers.contains_key(tool)
    }
}
