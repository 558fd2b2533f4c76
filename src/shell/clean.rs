//! Output normalization for pattern matching.
//!
//! Check commands often decorate their output with colors, carriage-return
//! progress redraws, or trailing whitespace. Cleaning removes all of that so
//! a check pattern only has to describe the text a person would read.

/// Normalize raw command output.
///
/// - ANSI escape sequences are stripped
/// - for each line, only the text after the last carriage return is kept
/// - remaining control characters other than tab are dropped
/// - trailing whitespace is trimmed from every line, and the whole result is trimmed
pub fn clean_output(raw: &str) -> String {
    let stripped = console::strip_ansi_codes(raw);

    let lines: Vec<String> = stripped
        .split('\n')
        .map(|line| {
            let visible = line.rsplit('\r').find(|s| !s.is_empty()).unwrap_or("");
            visible
                .chars()
                .filter(|c| *c == '\t' || !c.is_control())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();

    lines.join("\n").trim().to_string()
}
