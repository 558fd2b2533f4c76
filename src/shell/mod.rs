//! Shell command execution.

pub mod clean;
pub mod command;
pub mod mock;
pub mod runner;

pub use clean::clean_output;
pub use command::{execute_quiet, execute_streaming, CommandOptions, OutputChunk, ShellOutput};
pub use mock::ScriptedShell;
pub use runner::{ShellRunner, SystemShell};

/// Check if running under a CI provider.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
