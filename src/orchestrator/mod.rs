//! Bootstrap orchestration.
//!
//! The [`Orchestrator`] owns the ordered tool list and the installation
//! status map. It detects tools through a [`DetectionEngine`] and drives
//! installers one at a time, in platform order.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use toolstrap::orchestrator::Orchestrator;
//! use toolstrap::platform::PlatformFamily;
//! use toolstrap::shell::ScriptedShell;
//! use toolstrap::store::ConfigStore;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let shell = Rc::new(ScriptedShell::new());
//! shell.respond("node --version", "v20.11.0", 0);
//!
//! let mut orchestrator = Orchestrator::new(temp.path(), ConfigStore::new(temp.path().join("store.yml")))
//!     .with_platform(PlatformFamily::Unix)
//!     .with_shell(shell.clone());
//! orchestrator.init().unwrap();
//!
//! assert_eq!(orchestrator.status().get("node"), Some(true));
//! assert_eq!(orchestrator.status().get("python"), Some(false));
//! assert!(!orchestrator.all_installed());
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{FailurePolicy, Settings, ToolConfig, ToolstrapConfig};
use crate::detection::{DetectionEngine, InstallationStatus, ToolDescriptor};
use crate::error::{BootstrapError, Result};
use crate::installer::{InstallContext, InstallOptions, InstallerRegistry};
use crate::paths::{FsProbe, PathProbe, PathResolver};
use crate::platform::PlatformFamily;
use crate::shell::{CommandOptions, OutputChunk, ShellRunner, SystemShell};
use crate::store::{ConfigStore, HOME_KEY};
use crate::tools::{installer_registry, resolve_tool_order};

/// Outcome of a bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    /// Tools that were missing and got installed.
    pub installed: Vec<String>,
    /// Tools already present.
    pub skipped: Vec<String>,
    /// Tools whose install failed.
    pub failed: Vec<String>,
    /// Problems that did not stop the run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl BootstrapReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Detects and installs the required tools.
pub struct Orchestrator {
    platform: PlatformFamily,
    paths: PathResolver,
    store: ConfigStore,
    shell: Box<dyn ShellRunner>,
    probe: Box<dyn PathProbe>,
    installers: InstallerRegistry,
    overrides: BTreeMap<String, ToolConfig>,
    fixed_tools: Option<Vec<ToolDescriptor>>,
    settings: Settings,
    tools: Vec<ToolDescriptor>,
    status: InstallationStatus,
    all_installed: bool,
}

impl Orchestrator {
    /// An orchestrator for the current platform, rooted at `home`.
    ///
    /// Uses the system shell and filesystem, and command installers with no
    /// commands configured.
    pub fn new(home: impl Into<PathBuf>, store: ConfigStore) -> Self {
        Self {
            platform: PlatformFamily::current(),
            paths: PathResolver::new(home),
            store,
            shell: Box::new(SystemShell::new()),
            probe: Box::new(FsProbe),
            installers: installer_registry(&BTreeMap::new()),
            overrides: BTreeMap::new(),
            fixed_tools: None,
            settings: Settings::default(),
            tools: Vec::new(),
            status: InstallationStatus::new(),
            all_installed: false,
        }
    }

    /// An orchestrator configured from `config`.
    ///
    /// `settings.env` applies to every command, checks included.
    pub fn from_config(
        home: impl Into<PathBuf>,
        store: ConfigStore,
        config: &ToolstrapConfig,
    ) -> Self {
        let mut orchestrator = Self::new(home, store);
        orchestrator.shell = Box::new(SystemShell::with_options(CommandOptions {
            env: config.settings.env.clone(),
            ..Default::default()
        }));
        orchestrator.installers = installer_registry(&config.tools);
        orchestrator.overrides = config.tools.clone();
        orchestrator.settings = config.settings.clone();
        orchestrator
    }

    pub fn with_platform(mut self, platform: PlatformFamily) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_shell(mut self, shell: impl ShellRunner + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    pub fn with_probe(mut self, probe: impl PathProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_installers(mut self, installers: InstallerRegistry) -> Self {
        self.installers = installers;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Use `tools` as given instead of the platform order.
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.fixed_tools = Some(tools);
        self
    }

    /// Override the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.settings.failure_policy = policy;
        self
    }

    /// Prepare the working directory and detect every tool.
    pub fn init(&mut self) -> Result<()> {
        let working_dir = self.paths.bin(&[]);
        if let Err(e) = std::fs::create_dir_all(&working_dir) {
            tracing::warn!(
                "Could not create working directory {}: {}",
                working_dir.display(),
                e
            );
        }

        self.tools = self.resolve_tools()?;
        self.status = self.engine().detect_all(&self.tools);
        self.all_installed = self.status.all_installed();

        tracing::debug!(
            "Detected {} tools, missing: {:?}",
            self.status.len(),
            self.status.missing()
        );
        Ok(())
    }

    /// Root everything at `home` and install whatever is missing.
    ///
    /// Tools are re-checked one by one right before their turn; a missing
    /// tool is removed and then installed. `home` must be valid UTF-8 so it
    /// can be stored as given.
    pub fn bootstrap(
        &mut self,
        home: &Path,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<BootstrapReport> {
        let home_str = home.to_str().ok_or_else(|| BootstrapError::InvalidHome {
            path: home.to_path_buf(),
        })?;
        let mut report = BootstrapReport::default();

        self.store.set(HOME_KEY, home_str);
        if let Err(e) = self.store.save() {
            let warning = format!("Could not save {}: {}", self.store.path().display(), e);
            tracing::warn!("{}", warning);
            report.warnings.push(warning);
        }

        self.paths = PathResolver::new(home);
        self.init()?;

        let working_dir = self.working_dir();
        if !working_dir.is_dir() {
            report.warnings.push(format!(
                "Could not create working directory {}",
                working_dir.display()
            ));
        }

        let options = InstallOptions {
            env: self.settings.env.clone(),
        };

        for tool in &self.tools {
            if self.engine().is_installed(tool) {
                tracing::debug!("{} already installed", tool.name);
                report.skipped.push(tool.name.clone());
                continue;
            }

            tracing::debug!("{} missing; reinstalling", tool.name);
            match self.reinstall(&tool.name, &options, on_data) {
                Ok(()) => report.installed.push(tool.name.clone()),
                Err(e) => {
                    tracing::warn!("{} failed: {}", tool.name, e);
                    report.failed.push(tool.name.clone());
                    if self.settings.failure_policy == FailurePolicy::Abort {
                        return Err(e);
                    }
                }
            }
        }

        if !report.failed.is_empty() {
            return Err(BootstrapError::BootstrapIncomplete {
                failed: report.failed,
            });
        }
        Ok(report)
    }

    /// Remove and reinstall one tool, whether or not it is present.
    pub fn install(
        &mut self,
        name: &str,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        if self.tools.is_empty() {
            self.resolve()?;
        }
        if self.tool(name).is_none() {
            return Err(BootstrapError::UnknownTool {
                name: name.to_string(),
            });
        }
        self.reinstall(name, options, on_data)
    }

    /// Resolve the tool order without detecting anything.
    pub fn resolve(&mut self) -> Result<&[ToolDescriptor]> {
        self.tools = self.resolve_tools()?;
        Ok(&self.tools)
    }

    /// Every tool's expected paths, in tool order.
    pub fn modules_paths(&self) -> Vec<PathBuf> {
        self.tools
            .iter()
            .flat_map(|t| t.expected_paths.iter().cloned())
            .collect()
    }

    pub fn status(&self) -> &InstallationStatus {
        &self.status
    }

    pub fn all_installed(&self) -> bool {
        self.all_installed
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// `<home>/bin`.
    pub fn working_dir(&self) -> PathBuf {
        self.paths.bin(&[])
    }

    pub fn home(&self) -> &Path {
        self.paths.home()
    }

    pub fn platform(&self) -> PlatformFamily {
        self.platform
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn resolve_tools(&self) -> Result<Vec<ToolDescriptor>> {
        match &self.fixed_tools {
            Some(tools) => Ok(tools.clone()),
            None => resolve_tool_order(self.platform, &self.paths, &self.overrides),
        }
    }

    fn engine(&self) -> DetectionEngine<'_> {
        DetectionEngine::new(self.shell.as_ref(), self.probe.as_ref())
            .assume_installed_without_check(self.settings.assume_installed_without_check)
    }

    fn reinstall(
        &self,
        name: &str,
        options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        let installer = self
            .installers
            .get(name)
            .ok_or_else(|| BootstrapError::NoInstaller {
                tool: name.to_string(),
            })?;

        let ctx = InstallContext {
            tool: name,
            shell: self.shell.as_ref(),
            paths: &self.paths,
        };
        installer.remove(&ctx, options, on_data)?;
        installer.install(&ctx, options, on_data)
    }
}
