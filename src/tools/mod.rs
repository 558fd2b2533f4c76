//! The required toolchains and their install order.
//!
//! Ordering encodes install-time priority:
//!
//! - general-purpose package managers (conda) come last everywhere, since
//!   they can pull in competing copies of earlier tools
//! - on Windows the platform compiler toolchain (`win`) comes before python
//!   and conda, so later installers find it instead of bringing their own
//!
//! # Modules
//!
//! - [`builtin`] - Built-in footprints and checks for each tool

pub mod builtin;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::ToolConfig;
use crate::detection::ToolDescriptor;
use crate::error::Result;
use crate::installer::{CommandInstaller, InstallerRegistry};
use crate::paths::PathResolver;
use crate::platform::PlatformFamily;

/// A tool toolstrap knows how to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Scripting runtime.
    Python,
    /// JavaScript runtime.
    Node,
    /// Build-system generator.
    Cmake,
    /// OS package manager (non-Windows).
    Homebrew,
    /// Version-control client.
    Git,
    /// General-purpose package manager.
    Conda,
    /// Platform compiler toolchain (Windows).
    Win,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Python,
        ToolKind::Node,
        ToolKind::Cmake,
        ToolKind::Homebrew,
        ToolKind::Git,
        ToolKind::Conda,
        ToolKind::Win,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Python => "python",
            ToolKind::Node => "node",
            ToolKind::Cmake => "cmake",
            ToolKind::Homebrew => "homebrew",
            ToolKind::Git => "git",
            ToolKind::Conda => "conda",
            ToolKind::Win => "win",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown tool: {}", s))
    }
}

/// The install sequence for a platform family.
pub fn tool_sequence(platform: PlatformFamily) -> Vec<ToolKind> {
    match platform {
        PlatformFamily::Windows => vec![
            ToolKind::Node,
            ToolKind::Win,
            ToolKind::Python,
            ToolKind::Cmake,
            ToolKind::Git,
            ToolKind::Conda,
        ],
        PlatformFamily::Unix => vec![
            ToolKind::Python,
            ToolKind::Node,
            ToolKind::Cmake,
            ToolKind::Homebrew,
            ToolKind::Git,
            ToolKind::Conda,
        ],
    }
}

/// Build the ordered tool descriptors for `platform`.
///
/// Starts from the built-in descriptor of each tool and applies `overrides`.
/// Relative footprint paths resolve under the working directory. Touches
/// nothing on the host.
pub fn resolve_tool_order(
    platform: PlatformFamily,
    paths: &PathResolver,
    overrides: &BTreeMap<String, ToolConfig>,
) -> Result<Vec<ToolDescriptor>> {
    tool_sequence(platform)
        .into_iter()
        .map(|kind| {
            let mut tool = builtin::descriptor(kind, platform)?;
            if let Some(config) = overrides.get(kind.name()) {
                if let Some(declared) = &config.paths {
                    tool.expected_paths = declared.iter().map(Into::into).collect();
                }
                if let Some(check) = &config.check {
                    tool.check = check.to_strategy(kind.name())?;
                }
            }
            tool.expected_paths = tool
                .expected_paths
                .iter()
                .map(|p| paths.footprint(p))
                .collect();
            Ok(tool)
        })
        .collect()
}

/// One [`CommandInstaller`] per tool, from the configured commands.
pub fn installer_registry(overrides: &BTreeMap<String, ToolConfig>) -> InstallerRegistry {
    let mut registry = InstallerRegistry::new();
    for kind in ToolKind::ALL {
        let config = overrides.get(kind.name());
        registry.register(
            kind.name(),
            Box::new(CommandInstaller::new(
                config.and_then(|c| c.install.clone()),
                config.and_then(|c| c.remove.clone()),
            )),
        );
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfig;
    use std::path::PathBuf;

    fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    fn position(tools: &[ToolDescriptor], name: &str) -> usize {
        tools.iter().position(|t| t.name == name).unwrap()
    }

    #[test]
    fn unix_order() {
        let tools =
            resolve_tool_order(PlatformFamily::Unix, &PathResolver::new("/ts"), &BTreeMap::new())
                .unwrap();
        assert_eq!(
            names(&tools),
            vec!["python", "node", "cmake", "homebrew", "git", "conda"]
        );
    }

    #[test]
    fn windows_order() {
        let tools = resolve_tool_order(
            PlatformFamily::Windows,
            &PathResolver::new("/ts"),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(
            names(&tools),
            vec!["node", "win", "python", "cmake", "git", "conda"]
        );
    }

    #[test]
    fn windows_compiler_precedes_python_and_conda() {
        let tools = resolve_tool_order(
            PlatformFamily::Windows,
            &PathResolver::new("/ts"),
            &BTreeMap::new(),
        )
        .unwrap();
        let win = position(&tools, "win");
        assert!(win < position(&tools, "python"));
        assert!(win < position(&tools, "conda"));
    }

    #[test]
    fn general_package_manager_is_last_everywhere() {
        for platform in [PlatformFamily::Unix, PlatformFamily::Windows] {
            let seq = tool_sequence(platform);
            assert_eq!(seq.last(), Some(&ToolKind::Conda), "{platform}");
        }
    }

    #[test]
    fn homebrew_only_on_unix() {
        assert!(tool_sequence(PlatformFamily::Unix).contains(&ToolKind::Homebrew));
        assert!(!tool_sequence(PlatformFamily::Windows).contains(&ToolKind::Homebrew));
        assert!(!tool_sequence(PlatformFamily::Unix).contains(&ToolKind::Win));
    }

    #[test]
    fn relative_footprints_resolve_under_working_dir() {
        let tools =
            resolve_tool_order(PlatformFamily::Unix, &PathResolver::new("/ts"), &BTreeMap::new())
                .unwrap();
        let conda = &tools[position(&tools, "conda")];
        assert!(!conda.expected_paths.is_empty());
        for path in &conda.expected_paths {
            assert!(path.starts_with("/ts/bin"), "{}", path.display());
        }
    }

    #[test]
    fn overrides_replace_paths_and_check() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "git".to_string(),
            ToolConfig {
                paths: Some(vec!["git/cmd/git".into()]),
                ..Default::default()
            },
        );
        overrides.insert(
            "python".to_string(),
            ToolConfig {
                check: Some(CheckConfig {
                    succeeds: Some("python3 -c pass".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let tools =
            resolve_tool_order(PlatformFamily::Unix, &PathResolver::new("/ts"), &overrides)
                .unwrap();

        let git = &tools[position(&tools, "git")];
        assert_eq!(git.expected_paths, vec![PathBuf::from("/ts/bin/git/cmd/git")]);

        let python = &tools[position(&tools, "python")];
        assert!(python.check.is_predicate());
    }

    #[test]
    fn empty_path_override_clears_footprint() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "conda".to_string(),
            ToolConfig {
                paths: Some(vec![]),
                ..Default::default()
            },
        );
        let tools =
            resolve_tool_order(PlatformFamily::Unix, &PathResolver::new("/ts"), &overrides)
                .unwrap();
        assert!(tools[position(&tools, "conda")].expected_paths.is_empty());
    }

    #[test]
    fn malformed_override_pattern_fails_resolution() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "node".to_string(),
            ToolConfig {
                check: Some(CheckConfig {
                    run: Some("node -v".into()),
                    pattern: Some("v18".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        assert!(
            resolve_tool_order(PlatformFamily::Unix, &PathResolver::new("/ts"), &overrides)
                .is_err()
        );
    }

    #[test]
    fn tool_kind_round_trips_names() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>(), Ok(kind));
        }
        assert!("ruby".parse::<ToolKind>().is_err());
    }

    #[test]
    fn registry_has_every_tool() {
        let registry = installer_registry(&BTreeMap::new());
        for kind in ToolKind::ALL {
            assert!(registry.contains(kind.name()));
        }
    }
}
