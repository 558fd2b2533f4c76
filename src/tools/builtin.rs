//! Built-in detection for each tool.
//!
//! Footprints are relative to the working directory; [`resolve_tool_order`]
//! anchors them.
//!
//! [`resolve_tool_order`]: super::resolve_tool_order

use crate::detection::{CheckStrategy, ToolDescriptor};
use crate::error::Result;
use crate::platform::PlatformFamily;

use super::ToolKind;

/// Built-in descriptor for `kind` on `platform`.
pub fn descriptor(kind: ToolKind, platform: PlatformFamily) -> Result<ToolDescriptor> {
    let windows = platform == PlatformFamily::Windows;
    let tool = ToolDescriptor::new(kind.name());

    Ok(match kind {
        ToolKind::Python => {
            let run = if windows {
                "python --version"
            } else {
                "python3 --version"
            };
            tool.with_check(CheckStrategy::pattern(run, r"/Python \d+/")?)
        }
        ToolKind::Node => tool.with_check(CheckStrategy::pattern(
            "node --version",
            r"/v\d+\.\d+/",
        )?),
        ToolKind::Cmake => tool.with_check(CheckStrategy::pattern(
            "cmake --version",
            r"/cmake version \d+/i",
        )?),
        ToolKind::Homebrew => tool.with_check(CheckStrategy::pattern(
            "brew --version",
            r"/Homebrew \d+/",
        )?),
        ToolKind::Git => tool.with_check(CheckStrategy::negated(
            "git --version",
            "/not found|not recognized/i",
        )?),
        ToolKind::Conda => {
            if windows {
                tool.with_path("miniconda/Scripts/conda.exe")
            } else {
                tool.with_path("miniconda/bin/conda")
            }
        }
        ToolKind::Win => tool.with_check(CheckStrategy::negated(
            "where cl",
            "/Could not find/i",
        )?),
    })
}
