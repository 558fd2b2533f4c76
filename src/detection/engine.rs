//! Installed-or-not decisions for tool descriptors.
//!
//! The engine applies one detection path per tool, in priority order:
//!
//! 1. declared paths plus a predicate: the predicate decides
//! 2. declared paths: every path must exist
//! 3. predicate: the predicate decides
//! 4. pattern: the check command's cleaned output must match
//! 5. negated pattern: installed unless the cleaned output matches
//! 6. nothing declared: the configured default

use crate::paths::PathProbe;
use crate::shell::{CommandOptions, ShellRunner};

use super::descriptor::{CheckStrategy, ToolDescriptor};
use super::pattern::CheckPattern;
use super::status::InstallationStatus;

/// Decides whether tools are installed on the host.
pub struct DetectionEngine<'a> {
    shell: &'a dyn ShellRunner,
    probe: &'a dyn PathProbe,
    assume_installed_without_check: bool,
}

impl<'a> DetectionEngine<'a> {
    pub fn new(shell: &'a dyn ShellRunner, probe: &'a dyn PathProbe) -> Self {
        Self {
            shell,
            probe,
            assume_installed_without_check: true,
        }
    }

    /// Result for tools that declare neither paths nor a check.
    pub fn assume_installed_without_check(mut self, assume: bool) -> Self {
        self.assume_installed_without_check = assume;
        self
    }

    /// Whether `tool` is installed.
    pub fn is_installed(&self, tool: &ToolDescriptor) -> bool {
        let installed = self.evaluate(tool);
        tracing::debug!(
            "{}: {} (paths: {}, check: {})",
            tool.name,
            if installed { "installed" } else { "missing" },
            tool.expected_paths.len(),
            tool.check.kind()
        );
        installed
    }

    /// Detect every tool, one at a time, in order.
    pub fn detect_all(&self, tools: &[ToolDescriptor]) -> InstallationStatus {
        let mut status = InstallationStatus::new();
        for tool in tools {
            status.insert(&tool.name, self.is_installed(tool));
        }
        status
    }

    fn evaluate(&self, tool: &ToolDescriptor) -> bool {
        if !tool.expected_paths.is_empty() {
            if let CheckStrategy::Predicate(predicate) = &tool.check {
                return predicate(self.shell);
            }
            return self.all_paths_exist(tool);
        }

        match &tool.check {
            CheckStrategy::Predicate(predicate) => predicate(self.shell),
            CheckStrategy::Pattern { command, pattern } => self.output_matches(command, pattern),
            CheckStrategy::NegatedPattern { command, pattern } => {
                self.output_lacks_match(command, pattern)
            }
            CheckStrategy::None => self.assume_installed_without_check,
        }
    }

    fn all_paths_exist(&self, tool: &ToolDescriptor) -> bool {
        for path in &tool.expected_paths {
            if !self.probe.exists(path) {
                tracing::debug!("{}: missing {}", tool.name, path.display());
                return false;
            }
        }
        true
    }

    fn output_matches(&self, command: &str, pattern: &CheckPattern) -> bool {
        let mut matched = false;
        let result = self
            .shell
            .run(command, &CommandOptions::default(), &mut |chunk| {
                tracing::trace!("{}", chunk.raw.trim_end());
                if pattern.is_match(&chunk.cleaned) {
                    matched = true;
                }
            });

        match result {
            Ok(output) => matched || pattern.is_match(&output.cleaned),
            Err(e) => {
                tracing::debug!("Check `{}` could not run: {}", command, e);
                false
            }
        }
    }

    fn output_lacks_match(&self, command: &str, pattern: &CheckPattern) -> bool {
        let mut installed = true;
        let result = self
            .shell
            .run(command, &CommandOptions::default(), &mut |chunk| {
                if pattern.is_match(&chunk.cleaned) {
                    installed = false;
                }
            });

        match result {
            Ok(output) => installed && !pattern.is_match(&output.cleaned),
            Err(e) => {
                tracing::debug!("Check `{}` could not run: {}", command, e);
                false
            }
        }
    }
}
