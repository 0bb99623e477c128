//! Shebang sniffing for discovered files.

/// Extract the interpreter directive from the first line of a file, with
/// the `#!` prefix and surrounding whitespace removed.
pub fn get_shebang(file_content: &str) -> Option<&str> {
    let first_line = file_content.lines().next()?;
    first_line.strip_prefix("#!").map(str::trim)
}

/// Whether a shebang names a shell the analyzer understands.
///
/// Matches on the final path segment of the last word, so both
/// `#!/bin/bash` and `#!/usr/bin/env bash` are recognized.
pub fn is_supported_shell(shebang: &str) -> bool {
    let command = shebang
        .split_whitespace()
        .last()
        .and_then(|word| word.rsplit('/').next())
        .unwrap_or(shebang);
    matches!(command, "bash" | "sh")
}
