//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use toolstrap::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("config.yml"),
//!     "settings:\n  failure_policy: continue\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! ```
//!
//! # Configuration File Location
//!
//! `config.yml` lives in the state directory (`~/.toolstrap` unless
//! overridden). A missing file means built-in defaults.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    config_path, load_config, load_config_file, parse_config, resolve_home, DEFAULT_HOME_DIR,
};
pub use schema::{CheckConfig, FailurePolicy, Settings, ToolConfig, ToolstrapConfig};
pub use validator::{validate, validate_config, ValidationError};
