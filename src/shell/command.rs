//! Shell command execution.

use crate::error::{BootstrapError, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::clean::clean_output;

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Combined stdout and stderr, as produced.
    pub raw: String,

    /// `raw` normalized for pattern matching.
    pub cleaned: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl ShellOutput {
    /// Build a result from raw output, deriving the cleaned form.
    pub fn new(exit_code: Option<i32>, raw: String, duration: Duration) -> Self {
        let cleaned = clean_output(&raw);
        Self {
            exit_code,
            success: exit_code == Some(0),
            raw,
            cleaned,
            duration,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Run through an interactive login shell so rc-file activation applies.
    ///
    /// Off for detection: interactive shells add job-control and rc-file
    /// noise to the output that check patterns are matched against.
    pub interactive: bool,
}

/// One streamed piece of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// The line as the process wrote it, newline included.
    pub raw: String,

    /// The line with escape sequences and control characters removed.
    pub cleaned: String,

    /// Whether the line came from stderr.
    pub stderr: bool,
}

impl OutputChunk {
    pub fn stdout(line: &str) -> Self {
        Self::from_line(line, false)
    }

    pub fn stderr(line: &str) -> Self {
        Self::from_line(line, true)
    }

    fn from_line(line: &str, stderr: bool) -> Self {
        Self {
            raw: format!("{}\n", line),
            cleaned: clean_output(line),
            stderr,
        }
    }
}

/// Execute a command, streaming each output line to `on_data`.
///
/// The callback runs on the calling thread; stdout and stderr are read on
/// helper threads and interleaved in arrival order.
pub fn execute_streaming(
    command: &str,
    options: &CommandOptions,
    on_data: &mut dyn FnMut(&OutputChunk),
) -> Result<ShellOutput> {
    let start = Instant::now();

    let shell = detect_shell(options);
    let shell_flag = shell_flag(options.interactive);

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag);
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running `{}` via {} {}", command, shell, shell_flag);

    let mut child = cmd.spawn().map_err(|_| BootstrapError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(BootstrapError::CommandFailed {
            command: command.to_string(),
            code: None,
        });
    };

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        forward_lines(stdout, |line| {
            let _ = tx_stdout.send(OutputChunk::stdout(line));
        })
    });

    let stderr_handle = thread::spawn(move || {
        forward_lines(stderr, |line| {
            let _ = tx_stderr.send(OutputChunk::stderr(line));
        })
    });

    let mut raw = String::new();
    for chunk in rx {
        raw.push_str(&chunk.raw);
        on_data(&chunk);
    }

    let _ = stdout_handle.join();
    let _ = stderr_handle.join();

    let status = child.wait().map_err(|_| BootstrapError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    Ok(ShellOutput::new(status.code(), raw, start.elapsed()))
}

/// Read `source` to the end, handing each line to `emit` without its line ending.
///
/// Invalid UTF-8 is replaced rather than ending the stream, so the pipe
/// stays drained until the child exits.
fn forward_lines(source: impl Read, mut emit: impl FnMut(&str)) {
    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                emit(line.trim_end_matches(['\n', '\r']));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("Stopped reading command output: {}", e);
                break;
            }
        }
    }
}

/// Execute a command and collect its output without streaming.
pub fn execute_quiet(command: &str, options: &CommandOptions) -> Result<ShellOutput> {
    execute_streaming(command, options, &mut |_| {})
}

/// Detect the shell to run commands with.
///
/// A `SHELL` (or `COMSPEC`) in the command's own environment wins over the
/// process environment.
fn detect_shell(options: &CommandOptions) -> String {
    let (var, fallback) = if cfg!(target_os = "windows") {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "/bin/sh")
    };
    options
        .env
        .get(var)
        .cloned()
        .or_else(|| std::env::var(var).ok())
        .unwrap_or_else(|| fallback.to_string())
}

/// Get the flag to pass commands to the shell.
///
/// Interactive runs use `-lic` on Unix so tools activated in
/// `.zshrc`/`.bashrc` are on PATH. Everything else, and every run in CI,
/// uses `-lc`, which avoids `bash: cannot set terminal process group`
/// without a TTY.
fn shell_flag(interactive: bool) -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else if interactive && !super::is_ci() {
        "-lic"
    } else {
        "-lc"
    }
}
