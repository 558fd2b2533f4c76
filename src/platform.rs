//! Host platform family.

use std::fmt;
use std::str::FromStr;

/// Platform family used to pick a tool order.
///
/// Only the Windows/everything-else split matters for bootstrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

impl PlatformFamily {
    /// Detect the current platform family.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformFamily::Windows
        } else {
            PlatformFamily::Unix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFamily::Windows => "windows",
            PlatformFamily::Unix => "unix",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" | "win" => Ok(Self::Windows),
            "unix" | "linux" | "macos" | "darwin" => Ok(Self::Unix),
            _ => Err(format!("unknown platform: {}", s)),
        }
    }
}
