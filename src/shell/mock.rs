//! Scripted shell runner for testing.
//!
//! `ScriptedShell` implements [`ShellRunner`] without spawning processes.
//! Each command is answered from a table of canned responses, and every
//! invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use toolstrap::shell::{CommandOptions, ScriptedShell, ShellRunner};
//!
//! let shell = ScriptedShell::new();
//! shell.respond("python3 --version", "Python 3.11.4", 0);
//!
//! let out = shell
//!     .run("python3 --version", &CommandOptions::default(), &mut |_| {})
//!     .unwrap();
//! assert_eq!(out.cleaned, "Python 3.11.4");
//! assert_eq!(shell.calls(), vec!["python3 --version".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{BootstrapError, Result};

use super::command::{CommandOptions, OutputChunk, ShellOutput};
use super::runner::ShellRunner;

#[derive(Debug, Clone)]
enum Response {
    Output { text: String, exit_code: i32 },
    SpawnFailure,
}

/// Shell runner answering from canned responses.
///
/// Unknown commands behave like a missing binary: the shell prints
/// "command not found" and exits 127.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    responses: RefCell<HashMap<String, Response>>,
    calls: RefCell<Vec<String>>,
    interactive: RefCell<Vec<String>>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output` (one chunk per line) and `exit_code`.
    pub fn respond(&self, command: &str, output: &str, exit_code: i32) {
        self.responses.borrow_mut().insert(
            command.to_string(),
            Response::Output {
                text: output.to_string(),
                exit_code,
            },
        );
    }

    /// Make `command` fail to start.
    pub fn fail_to_spawn(&self, command: &str) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), Response::SpawnFailure);
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Commands that asked for an interactive shell, in call order.
    pub fn interactive_calls(&self) -> Vec<String> {
        self.interactive.borrow().clone()
    }

    /// How many times `command` was run.
    pub fn call_count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

impl ShellRunner for ScriptedShell {
    fn run(
        &self,
        command: &str,
        options: &CommandOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<ShellOutput> {
        self.calls.borrow_mut().push(command.to_string());
        if options.interactive {
            self.interactive.borrow_mut().push(command.to_string());
        }

        let response = self.responses.borrow().get(command).cloned();
        let (text, exit_code) = match response {
            Some(Response::Output { text, exit_code }) => (text, exit_code),
            Some(Response::SpawnFailure) => {
                return Err(BootstrapError::CommandFailed {
                    command: command.to_string(),
                    code: None,
                })
            }
            None => {
                let program = command.split_whitespace().next().unwrap_or(command);
                (format!("sh: {}: command not found", program), 127)
            }
        };

        let mut raw = String::new();
        for line in text.lines() {
            let chunk = OutputChunk::stdout(line);
            raw.push_str(&chunk.raw);
            on_data(&chunk);
        }

        Ok(ShellOutput::new(Some(exit_code), raw, Duration::ZERO))
    }
}
