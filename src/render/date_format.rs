//! Date formatting for the `{{date}}` title token.
//!
//! Two pattern flavours are accepted. Anything containing `%` is a chrono strftime pattern.
//! Everything else is read as Moment-style tokens (`YYYY`, `MMMM`, `Do`, ...), with `[...]` for
//! literal text.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};

/// Used when a strftime pattern is invalid.
const FALLBACK_PATTERN: &str = "%Y-%m-%d";

/// Moment tokens, longest first so `MMMM` wins over `MM` and `M`.
const MOMENT_TOKENS: [&str; 12] = [
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DDDD", "Do", "DD", "D", "dddd", "ddd",
];

/// What: Format `date` with a strftime or Moment-style pattern.
///
/// Inputs:
/// - `date`: Date to format.
/// - `pattern`: strftime (`%B %-d`) or Moment (`MMMM Do`) pattern.
///
/// Output:
/// - Formatted date; ISO `YYYY-MM-DD` if a strftime pattern is invalid.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    if pattern.contains('%') {
        format_strftime(date, pattern)
    } else {
        format_moment(date, pattern)
    }
}

/// strftime path; invalid specifiers fall back to ISO instead of panicking in `Display`.
fn format_strftime(date: NaiveDate, pattern: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    let mut out = String::new();
    if !items.iter().any(|i| matches!(i, Item::Error))
        && write!(out, "{}", date.format_with_items(items.iter())).is_ok()
    {
        return out;
    }
    tracing::warn!(pattern, "invalid date format; falling back to ISO date");
    date.format(FALLBACK_PATTERN).to_string()
}

/// Moment-style tokens; unknown characters are copied through.
fn format_moment(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    'outer: while let Some(c) = rest.chars().next() {
        if c == '['
            && let Some(close) = rest.find(']')
        {
            out.push_str(&rest[1..close]);
            rest = &rest[close + 1..];
            continue;
        }
        for tok in MOMENT_TOKENS {
            if let Some(tail) = rest.strip_prefix(tok) {
                push_moment_token(&mut out, date, tok);
                rest = tail;
                continue 'outer;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Append the value of one Moment token.
fn push_moment_token(out: &mut String, date: NaiveDate, token: &str) {
    let value = match token {
        "YYYY" => date.year().to_string(),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => date.format("%B").to_string(),
        "MMM" => date.format("%b").to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DDDD" => format!("{:03}", date.ordinal()),
        "Do" => format!("{}{}", date.day(), ordinal_suffix(date.day())),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => date.format("%A").to_string(),
        "ddd" => date.format("%a").to_string(),
        _ => return,
    };
    out.push_str(&value);
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
const fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
