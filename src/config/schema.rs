//! Configuration schema definitions.
//!
//! These structs map to the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::detection::CheckStrategy;
use crate::error::{BootstrapError, Result};

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolstrapConfig {
    /// Home directory used when none has been stored by a bootstrap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    /// Global settings.
    pub settings: Settings,

    /// Per-tool overrides, keyed by tool name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolConfig>,
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Result for tools that declare neither paths nor a check.
    #[serde(default = "default_true")]
    pub assume_installed_without_check: bool,

    /// What bootstrap does when one tool fails to install.
    pub failure_policy: FailurePolicy,

    /// Environment passed to every command, checks and installers alike.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assume_installed_without_check: true,
            failure_policy: FailurePolicy::default(),
            env: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Handling of a failed install during bootstrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failure; later tools are not attempted.
    #[default]
    Abort,
    /// Attempt every tool, then report all failures together.
    Continue,
}

/// Overrides for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Footprint paths. Relative paths resolve under `<home>/bin`.
    /// An empty list clears the built-in footprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,

    /// Replacement check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckConfig>,

    /// Command that installs the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,

    /// Command that removes the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
}

/// A check as written in configuration.
///
/// Exactly one of `pattern`, `negative`, `succeeds` may be set;
/// `pattern` and `negative` need `run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeds: Option<String>,
}

impl CheckConfig {
    /// Compile into a [`CheckStrategy`].
    pub fn to_strategy(&self, tool: &str) -> Result<CheckStrategy> {
        let invalid = |message: &str| BootstrapError::ConfigValidationError {
            message: format!("tools.{}.check: {}", tool, message),
        };

        match (&self.pattern, &self.negative, &self.succeeds) {
            (Some(pattern), None, None) => {
                let run = self
                    .run
                    .as_deref()
                    .ok_or_else(|| invalid("`pattern` needs `run`"))?;
                CheckStrategy::pattern(run, pattern)
            }
            (None, Some(negative), None) => {
                let run = self
                    .run
                    .as_deref()
                    .ok_or_else(|| invalid("`negative` needs `run`"))?;
                CheckStrategy::negated(run, negative)
            }
            (None, None, Some(command)) => {
                if self.run.is_some() {
                    return Err(invalid("`succeeds` takes its own command; drop `run`"));
                }
                Ok(CheckStrategy::succeeds(command))
            }
            (None, None, None) => Err(invalid("one of `pattern`, `negative`, `succeeds` is required")),
            _ => Err(invalid("only one of `pattern`, `negative`, `succeeds` may be set")),
        }
    }
}
