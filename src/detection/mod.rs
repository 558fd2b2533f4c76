//! Tool detection.
//!
//! # Modules
//!
//! - [`pattern`] - `/body/flags` check patterns, compiled at construction
//! - [`descriptor`] - Tool descriptors and check strategies
//! - [`engine`] - The installed-or-not decision procedure
//! - [`status`] - Per-tool installation-status snapshots

pub mod descriptor;
pub mod engine;
pub mod pattern;
pub mod status;

pub use descriptor::{CheckStrategy, Predicate, ToolDescriptor};
pub use engine::DetectionEngine;
pub use pattern::{CheckPattern, PatternFlags};
pub use status::InstallationStatus;
