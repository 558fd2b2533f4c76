//! Tool descriptors and check strategies.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::shell::ShellRunner;

use super::pattern::CheckPattern;

/// A custom installed-check.
///
/// Receives the shell runner so predicates can probe the host the same way
/// pattern checks do.
pub type Predicate = Arc<dyn Fn(&dyn ShellRunner) -> bool + Send + Sync>;

/// How a tool's presence is decided when paths alone don't settle it.
#[derive(Clone, Default)]
pub enum CheckStrategy {
    /// No check; detection relies on paths or the configured default.
    #[default]
    None,

    /// A custom predicate. Overrides path checks when both are present.
    Predicate(Predicate),

    /// Run `command`; installed iff the cleaned output matches `pattern`.
    Pattern {
        command: String,
        pattern: CheckPattern,
    },

    /// Run `command`; installed unless the cleaned output matches `pattern`.
    NegatedPattern {
        command: String,
        pattern: CheckPattern,
    },
}

impl CheckStrategy {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&dyn ShellRunner) -> bool + Send + Sync + 'static,
    {
        CheckStrategy::Predicate(Arc::new(f))
    }

    /// Positive pattern check. Fails if `pattern` is malformed.
    pub fn pattern(command: &str, pattern: &str) -> Result<Self> {
        Ok(CheckStrategy::Pattern {
            command: command.to_string(),
            pattern: CheckPattern::parse(pattern)?,
        })
    }

    /// Negated pattern check. Fails if `pattern` is malformed.
    pub fn negated(command: &str, pattern: &str) -> Result<Self> {
        Ok(CheckStrategy::NegatedPattern {
            command: command.to_string(),
            pattern: CheckPattern::parse(pattern)?,
        })
    }

    /// Predicate that passes when `command` exits with status 0.
    pub fn succeeds(command: &str) -> Self {
        let command = command.to_string();
        Self::predicate(move |shell| {
            shell
                .run(&command, &Default::default(), &mut |_| {})
                .map(|out| out.success)
                .unwrap_or(false)
        })
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, CheckStrategy::Predicate(_))
    }

    /// Short label used in logs and status output.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckStrategy::None => "none",
            CheckStrategy::Predicate(_) => "predicate",
            CheckStrategy::Pattern { .. } => "pattern",
            CheckStrategy::NegatedPattern { .. } => "negated-pattern",
        }
    }
}

impl fmt::Debug for CheckStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStrategy::None => f.write_str("None"),
            CheckStrategy::Predicate(_) => f.write_str("Predicate(..)"),
            CheckStrategy::Pattern { command, pattern } => f
                .debug_struct("Pattern")
                .field("command", command)
                .field("pattern", &pattern.to_string())
                .finish(),
            CheckStrategy::NegatedPattern { command, pattern } => f
                .debug_struct("NegatedPattern")
                .field("command", command)
                .field("pattern", &pattern.to_string())
                .finish(),
        }
    }
}

/// Declarative description of a tool: what it is called, where it lives,
/// and how to tell whether it is installed.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Unique name, stable across platforms (e.g. "python").
    pub name: String,
    /// Paths that must all exist for the tool to count as installed.
    pub expected_paths: Vec<PathBuf>,
    /// Check used when paths are absent, or a predicate overriding them.
    pub check: CheckStrategy,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected_paths: Vec::new(),
            check: CheckStrategy::None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.expected_paths.push(path.into());
        self
    }

    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.expected_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_check(mut self, check: CheckStrategy) -> Self {
        self.check = check;
        self
    }
}
