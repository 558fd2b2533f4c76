//! Path resolution and existence probing.
//!
//! [`PathResolver`] roots every tool footprint under the bootstrap home
//! directory. [`PathProbe`] abstracts the filesystem existence check used by
//! detection so it can be swapped in tests.

use std::path::{Path, PathBuf};

/// Name of the working directory, under home, that tools install into.
pub const BIN_DIR: &str = "bin";

/// Resolves relative segment lists to absolute paths under a fixed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    home: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// The home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Join segments onto the home directory.
    pub fn path(&self, segments: &[&str]) -> PathBuf {
        segments
            .iter()
            .fold(self.home.clone(), |acc, seg| acc.join(seg))
    }

    /// Join segments onto the working directory (`<home>/bin`).
    pub fn bin(&self, segments: &[&str]) -> PathBuf {
        segments
            .iter()
            .fold(self.home.join(BIN_DIR), |acc, seg| acc.join(seg))
    }

    /// Resolve a declared footprint path.
    ///
    /// Absolute paths are kept; relative ones land under the working directory.
    pub fn footprint(&self, declared: &Path) -> PathBuf {
        if declared.is_absolute() {
            declared.to_path_buf()
        } else {
            self.bin(&[]).join(declared)
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Filesystem existence check.
pub trait PathProbe {
    /// Whether `path` exists. Never fails; errors read as "absent".
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_joins_segments_under_home() {
        let resolver = PathResolver::new("/opt/ts");
        assert_eq!(
            resolver.path(&["bin", "conda"]),
            PathBuf::from("/opt/ts/bin/conda")
        );
        assert_eq!(resolver.path(&[]), PathBuf::from("/opt/ts"));
    }

    #[test]
    fn bin_is_rooted_at_working_dir() {
        let resolver = PathResolver::new("/opt/ts");
        assert_eq!(resolver.bin(&[]), PathBuf::from("/opt/ts/bin"));
        assert_eq!(
            resolver.bin(&["python", "bin"]),
            PathBuf::from("/opt/ts/bin/python/bin")
        );
    }

    #[test]
    fn footprint_keeps_absolute_paths() {
        let resolver = PathResolver::new("/opt/ts");
        let abs = if cfg!(windows) {
            PathBuf::from(r"C:\Git\bin\git.exe")
        } else {
            PathBuf::from("/usr/bin/git")
        };
        assert_eq!(resolver.footprint(&abs), abs);
        assert_eq!(
            resolver.footprint(Path::new("miniconda/bin/conda")),
            PathBuf::from("/opt/ts/bin/miniconda/bin/conda")
        );
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde("rel/x"), PathBuf::from("rel/x"));
    }

    #[test]
    fn expand_tilde_uses_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/ts"), home.join("ts"));
        }
    }

    #[test]
    fn fs_probe_reports_existence() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("git");
        assert!(!FsProbe.exists(&file));
        std::fs::write(&file, "").unwrap();
        assert!(FsProbe.exists(&file));
    }
}
