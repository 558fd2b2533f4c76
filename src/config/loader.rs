//! Configuration file discovery and loading.

use crate::config::schema::ToolstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::paths::expand_tilde;
use crate::store::ConfigStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Default home when neither the store, the CLI, nor the config names one.
pub const DEFAULT_HOME_DIR: &str = "toolstrap";

/// Config file location inside a state directory.
pub fn config_path(state_dir: &Path) -> PathBuf {
    state_dir.join("config.yml")
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ToolstrapConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BootstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BootstrapError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ToolstrapConfig> {
    if content.trim().is_empty() {
        return Ok(ToolstrapConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| BootstrapError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit override must exist. The default location is optional and
/// falls back to built-in defaults when absent.
pub fn load_config(state_dir: &Path, config_override: Option<&Path>) -> Result<ToolstrapConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    let path = config_path(state_dir);
    if path.exists() {
        load_config_file(&path)
    } else {
        tracing::debug!("No config at {}; using defaults", path.display());
        Ok(ToolstrapConfig::default())
    }
}

/// Pick the bootstrap home directory.
///
/// Priority: explicit override, then the value stored by the last
/// bootstrap, then `home` from config, then `~/toolstrap`.
pub fn resolve_home(
    override_home: Option<&Path>,
    store: &ConfigStore,
    config: &ToolstrapConfig,
) -> PathBuf {
    if let Some(home) = override_home {
        return home.to_path_buf();
    }
    if let Some(home) = store.home() {
        return home;
    }
    if let Some(home) = &config.home {
        return expand_tilde(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}
