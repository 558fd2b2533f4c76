//! Recording installer for testing.
//!
//! `RecordingInstaller` writes `remove:<tool>` and `install:<tool>` entries
//! into a shared [`InstallerLog`] and can manage a set of marker files, so
//! tests can observe both the call sequence and the resulting filesystem.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{BootstrapError, Result};
use crate::shell::OutputChunk;

use super::{InstallContext, InstallOptions, Installer};

/// Shared, ordered record of installer calls.
#[derive(Debug, Clone, Default)]
pub struct InstallerLog(Arc<Mutex<Vec<String>>>);

impl InstallerLog {
    pub fn push(&self, entry: String) {
        if let Ok(mut entries) = self.0.lock() {
            entries.push(entry);
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

/// Installer that records calls and creates/deletes marker files.
#[derive(Debug, Clone)]
pub struct RecordingInstaller {
    log: InstallerLog,
    files: Vec<PathBuf>,
    fail_install: bool,
}

impl RecordingInstaller {
    pub fn new(log: InstallerLog) -> Self {
        Self {
            log,
            files: Vec::new(),
            fail_install: false,
        }
    }

    /// Files to create on install and delete on remove.
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Make every install call fail.
    pub fn failing(mut self) -> Self {
        self.fail_install = true;
        self
    }
}

impl Installer for RecordingInstaller {
    fn install(
        &self,
        ctx: &InstallContext<'_>,
        _options: &InstallOptions,
        on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        self.log.push(format!("install:{}", ctx.tool));
        on_data(&OutputChunk::stdout(&format!("installing {}", ctx.tool)));

        if self.fail_install {
            return Err(BootstrapError::InstallFailed {
                tool: ctx.tool.to_string(),
                message: "scripted failure".to_string(),
            });
        }

        for file in &self.files {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(file, ctx.tool)?;
        }
        Ok(())
    }

    fn remove(
        &self,
        ctx: &InstallContext<'_>,
        _options: &InstallOptions,
        _on_data: &mut dyn FnMut(&OutputChunk),
    ) -> Result<()> {
        self.log.push(format!("remove:{}", ctx.tool));
        for file in &self.files {
            if file.exists() {
                std::fs::remove_file(file)?;
            }
        }
        Ok(())
    }
}
