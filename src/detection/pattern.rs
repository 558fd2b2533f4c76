//! Check patterns written as `/body/flags`.
//!
//! Tool definitions carry their output patterns as delimited strings, the
//! same way they appear in configuration files. [`CheckPattern::parse`]
//! compiles them once, when a descriptor is built, so a malformed pattern is
//! reported immediately instead of at the first check.
//!
//! # Flags
//!
//! | flag | effect                                                |
//! |------|-------------------------------------------------------|
//! | `g`  | match every occurrence (always forced on)             |
//! | `i`  | case-insensitive                                      |
//! | `m`  | `^`/`$` match at line boundaries                      |
//! | `s`  | `.` matches newlines                                  |
//! | `u`  | unicode (always on in the regex engine)               |
//! | `y`  | sticky: the match must start at the beginning         |
//! | `d`  | match indices; accepted and recorded only             |

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

use crate::error::{BootstrapError, Result};

const VALID_FLAGS: &str = "dgimsuy";

/// Parsed pattern flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
    pub indices: bool,
}

impl PatternFlags {
    fn parse(raw: &str, source: &str) -> Result<Self> {
        let mut flags = Self::default();
        for c in raw.chars() {
            let slot = match c {
                'd' => &mut flags.indices,
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'y' => &mut flags.sticky,
                other => {
                    return Err(invalid(
                        source,
                        format!("unknown flag '{}' (expected one of {})", other, VALID_FLAGS),
                    ))
                }
            };
            if *slot {
                return Err(invalid(source, format!("duplicate flag '{}'", c)));
            }
            *slot = true;
        }
        Ok(flags)
    }

    fn render(&self) -> String {
        [
            (self.indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, c)| *c)
        .collect()
    }
}

/// A compiled check pattern.
#[derive(Debug, Clone)]
pub struct CheckPattern {
    body: String,
    flags: PatternFlags,
    regex: Regex,
}

impl CheckPattern {
    /// Parse and compile a `/body/flags` string.
    ///
    /// The global flag is added when absent.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();

        let Some(rest) = source.strip_prefix('/') else {
            return Err(invalid(source, "must start with '/'"));
        };
        let Some(close) = rest.rfind('/') else {
            return Err(invalid(source, "missing closing '/'"));
        };

        let body = &rest[..close];
        if body.is_empty() {
            return Err(invalid(source, "empty pattern body"));
        }

        let mut flags = PatternFlags::parse(&rest[close + 1..], source)?;
        flags.global = true;

        let expr = if flags.sticky {
            format!(r"\A(?:{})", body)
        } else {
            body.to_string()
        };

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .unicode(true)
            .build()
            .map_err(|e| invalid(source, e.to_string()))?;

        Ok(Self {
            body: body.to_string(),
            flags,
            regex,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Whether the pattern matches anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for CheckPattern {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.flags == other.flags
    }
}

impl Eq for CheckPattern {}

impl fmt::Display for CheckPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.body, self.flags.render())
    }
}

impl FromStr for CheckPattern {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn invalid(source: &str, message: impl Into<String>) -> BootstrapError {
    BootstrapError::InvalidPattern {
        pattern: source.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_body_and_flags() {
        let pattern = CheckPattern::parse("/python \\d+/i").unwrap();
        assert_eq!(pattern.body(), "python \\d+");
        assert!(pattern.flags().ignore_case);
        assert!(pattern.is_match("Python 3.11.4"));
    }

    #[test]
    fn forces_global_flag() {
        let pattern = CheckPattern::parse("/Python \\d+/").unwrap();
        assert!(pattern.flags().global);
        assert_eq!(pattern.to_string(), "/Python \\d+/g");

        let already = CheckPattern::parse("/x/gi").unwrap();
        assert_eq!(already.to_string(), "/x/gi");
    }

    #[test]
    fn global_flag_does_not_change_what_matches() {
        let with_g = CheckPattern::parse("/Python \\d+/g").unwrap();
        let without = CheckPattern::parse("/Python \\d+/").unwrap();
        for input in ["Python 3.11.4", "command not found", "python 3", ""] {
            assert_eq!(with_g.is_match(input), without.is_match(input), "{input}");
        }
        assert_eq!(with_g, without);
    }

    #[test]
    fn body_may_contain_slashes() {
        let pattern = CheckPattern::parse("/usr/bin/git/").unwrap();
        assert_eq!(pattern.body(), "usr/bin/git");
        assert!(pattern.is_match("/usr/bin/git"));
    }

    #[test]
    fn multi_line_and_dot_all() {
        let anchored = CheckPattern::parse("/^conda \\d+/m").unwrap();
        assert!(anchored.is_match("warning: something\nconda 24.1.2"));

        let not_multi = CheckPattern::parse("/^conda \\d+/").unwrap();
        assert!(!not_multi.is_match("warning: something\nconda 24.1.2"));

        let dot_all = CheckPattern::parse("/cmake.+suite/s").unwrap();
        assert!(dot_all.is_match("cmake version 3.27\nCMake suite"));
    }

    #[test]
    fn sticky_anchors_at_start() {
        let sticky = CheckPattern::parse("/git/y").unwrap();
        assert!(sticky.is_match("git version 2.43.0"));
        assert!(!sticky.is_match("no git here"));
    }

    #[test]
    fn rejects_missing_delimiters() {
        assert!(matches!(
            CheckPattern::parse("Python"),
            Err(BootstrapError::InvalidPattern { .. })
        ));
        assert!(CheckPattern::parse("/Python").is_err());
    }

    #[test]
    fn rejects_empty_body() {
        assert!(CheckPattern::parse("//g").is_err());
    }

    #[test]
    fn rejects_unknown_and_duplicate_flags() {
        let err = CheckPattern::parse("/x/q").unwrap_err();
        assert!(err.to_string().contains("unknown flag"));

        let err = CheckPattern::parse("/x/ii").unwrap_err();
        assert!(err.to_string().contains("duplicate flag"));
    }

    #[test]
    fn rejects_invalid_regex_body() {
        let err = CheckPattern::parse("/(unclosed/").unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidPattern { .. }));
    }

    #[test]
    fn from_str_parses() {
        let pattern: CheckPattern = "/not found/i".parse().unwrap();
        assert!(pattern.is_match("bash: git: command NOT FOUND"));
    }
}
