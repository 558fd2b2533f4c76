//! Process-wide key-value store.
//!
//! [`ConfigStore`] holds values installers read during a bootstrap, most
//! importantly the `home` directory. It is persisted as YAML so a later
//! `toolstrap status` sees the home chosen by the last bootstrap.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};

/// Key under which the bootstrap home directory is stored.
pub const HOME_KEY: &str = "home";

/// Default location of the state directory (`~/.toolstrap`).
pub fn state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".toolstrap")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Persistent string key-value store.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Default store file path.
    pub fn default_path() -> PathBuf {
        state_dir().join("store.yml")
    }

    /// An empty store that will save to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Load the store from `path`, or start empty if the file is absent.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path)?;
        let file: StoreFile =
            serde_yaml::from_str(&content).map_err(|e| BootstrapError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path,
            values: file.values,
        })
    }

    /// Save the store using write-to-temp-then-rename.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = StoreFile {
            values: self.values.clone(),
        };
        let content =
            serde_yaml::to_string(&file).map_err(|e| BootstrapError::ConfigValidationError {
                message: format!("Failed to serialize store: {}", e),
            })?;

        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// The stored home directory, if any.
    pub fn home(&self) -> Option<PathBuf> {
        self.get(HOME_KEY).map(PathBuf::from)
    }
}
