//! Comment-block documentation extraction.
//!
//! Shell scripts conventionally document a function or variable with a
//! run of `#` comment lines directly above it. This module collects such
//! a block and renders it as a fenced text block for hover/completion
//! documentation.

use std::sync::LazyLock;

use regex::Regex;

// Leading whitespace, `#`, at most one following whitespace, remainder.
static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s?(.*)").expect("comment pattern is valid"));

/// The contiguous comment block directly above `line` (0-based), rendered
/// as a ```` ```txt ```` fenced block, or `None` if the line above is not
/// a comment.
///
/// Scanning moves strictly upward and stops at the first line that is not
/// a comment; a blank line terminates the block. Each comment line loses
/// its leading whitespace, `#`, at most one space after it, and any
/// trailing whitespace.
pub fn comments_above(text: &str, line: u32) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    // Gathered bottom-up, reversed before rendering.
    let mut block: Vec<&str> = Vec::new();
    let mut current = line as usize;
    while current > 0 {
        current -= 1;
        match comment_body(lines.get(current).copied().unwrap_or("")) {
            Some(body) => block.push(body),
            None => break,
        }
    }

    if block.is_empty() {
        return None;
    }

    block.reverse();
    Some(format!("```txt\n{}\n```", block.join("\n")))
}

/// The body of a comment line with trailing whitespace removed, or `None`
/// if the line is not a comment.
fn comment_body(line: &str) -> Option<&str> {
    COMMENT_LINE
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str().trim_end())
}
