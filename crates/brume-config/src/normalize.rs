//! Canonicalization of raw configuration text.
//!
//! Normalization renders every line into one of four canonical forms —
//! `"cmd # comment"`, `"cmd"`, `"# comment"`, `""` — drops the
//! terminator directive and everything after it, and strips leading and
//! trailing blank lines. It is idempotent: normalizing already-normalized
//! text is a no-op.

/// The directive that ends the effective configuration text.
///
/// Everything from the first terminator line onward is discarded during
/// normalization, matching the engine's own reading behavior.
pub const TERMINATOR: &str = "end_file";

/// Comment marker; everything after the first occurrence is commentary.
const COMMENT_MARKER: char = '#';

/// Canonicalize one line.
///
/// The line is split at the first `#`; interior whitespace in the command
/// part is collapsed to single spaces; the comment part is trimmed; the
/// two are reassembled with `" # "` between them when both are present.
///
/// # Examples
///
/// ```
/// use brume_config::normalize_line;
///
/// assert_eq!(normalize_line("  difc   red   3  # slow "), "difc red 3 # slow");
/// assert_eq!(normalize_line("   # note"), "# note");
/// assert_eq!(normalize_line("difc red 3"), "difc red 3");
/// assert_eq!(normalize_line("   "), "");
/// ```
pub fn normalize_line(line: &str) -> String {
    let (cmd_raw, comment_raw) = match line.find(COMMENT_MARKER) {
        Some(pos) => (&line[..pos], Some(&line[pos + 1..])),
        None => (line, None),
    };

    let cmd = collapse_whitespace(cmd_raw);
    let comment = comment_raw.map(str::trim);

    match (cmd.is_empty(), comment) {
        (false, Some(c)) if !c.is_empty() => format!("{cmd} # {c}"),
        (false, _) => cmd,
        (true, Some(c)) if !c.is_empty() => format!("# {c}"),
        (true, _) => String::new(),
    }
}

/// Canonicalize a line sequence.
///
/// Per-line normalization, then truncation at the first line whose
/// command starts with the [`TERMINATOR`] token, then removal of
/// leading and trailing blank lines.
pub fn normalize<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = normalize_line(line.as_ref());
        if command_part(&line).split_whitespace().next() == Some(TERMINATOR) {
            break;
        }
        out.push(line);
    }

    let first = out.iter().position(|l| !l.is_empty());
    match first {
        None => Vec::new(),
        Some(first) => {
            // Non-empty line exists, so rposition is Some.
            let last = out.iter().rposition(|l| !l.is_empty()).unwrap_or(first);
            out.drain(..first);
            out.truncate(last + 1 - first);
            out
        }
    }
}

/// The command part of a normalized line (text before any comment).
fn command_part(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for token in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
