//! Shared utilities for argument processing.

use std::io::{BufRead, Write};

use onthisday::editor::{Notifier, Position};

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a 1-based `LINE:COL` into a zero-based [`Position`].
///
/// Inputs:
/// - `s`: Text such as `3:1`; `LINE` alone means column 1.
///
/// Output:
/// - `Ok(Position)`, or a message clap prints on error.
///
/// # Errors
/// - Non-numeric parts or zero values.
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (line, col) = s.trim().split_once(':').unwrap_or((s.trim(), "1"));
    let parse = |part: &str, what: &str| -> Result<usize, String> {
        match part.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("invalid {what} '{part}' (expected a number starting at 1)")),
        }
    };
    Ok(Position {
        line: parse(line, "line")?,
        ch: parse(col, "column")?,
    })
}

/// What: Parse `LINE:COL-LINE:COL` into a selection.
///
/// # Errors
/// - Missing `-` separator or an invalid position.
pub fn parse_span(s: &str) -> Result<(Position, Position), String> {
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| format!("invalid selection '{s}' (expected LINE:COL-LINE:COL)"))?;
    Ok((parse_position(from)?, parse_position(to)?))
}

/// Expand `\n`, `\t`, and `\\` typed on the command line.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// What: Ask a yes/no question on the terminal.
///
/// Inputs:
/// - `question`: Prompt text.
///
/// Output:
/// - `true` only for an explicit `y`/`yes`; read failures count as "no".
pub fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Notices go to stderr and the log.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notice(&mut self, message: &str) {
        tracing::info!(notice = message, "notice raised");
        eprintln!("{message}");
    }
}
