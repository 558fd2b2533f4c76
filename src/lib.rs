//! toolstrap - Detect and bootstrap the development toolchains a workspace needs.
//!
//! toolstrap checks whether python, node, cmake, git, conda, and the
//! platform-specific extras (homebrew off Windows, the compiler toolchain
//! on Windows) are installed, then installs the missing ones one at a
//! time, in an order that keeps later installers from pulling in their own
//! copies of earlier tools.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`detection`] - Tool descriptors, check patterns, and the detection engine
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Installer interface and implementations
//! - [`orchestrator`] - Init, bootstrap, and install lifecycle
//! - [`paths`] - Home-rooted path resolution and filesystem probing
//! - [`platform`] - Host platform family
//! - [`shell`] - Shell command execution
//! - [`store`] - Persistent key-value store
//! - [`tools`] - Built-in tools and platform install order
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use toolstrap::detection::CheckPattern;
//!
//! let pattern = CheckPattern::parse(r"/Python \d+/").unwrap();
//! assert!(pattern.is_match("Python 3.11.4"));
//! assert!(pattern.flags().global);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod installer;
pub mod orchestrator;
pub mod paths;
pub mod platform;
pub mod shell;
pub mod store;
pub mod tools;
pub mod ui;

pub use error::{BootstrapError, Result};
