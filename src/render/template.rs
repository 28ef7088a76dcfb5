//! Placeholder templates: `{{token}}` substitution and `{{if field}}...{{endif}}` blocks.
//!
//! Rendering is two explicit passes over a tokenized template. The first pass resolves
//! conditional blocks, the second replaces tokens. Substituted values are never re-scanned, so a
//! description containing `{{year}}` comes out verbatim.

/// A piece of a tokenized template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Literal text.
    Text(&'a str),
    /// `{{name}}`; `raw` is the full marker as written.
    Token {
        /// Trimmed token name.
        name: &'a str,
        /// Original marker text.
        raw: &'a str,
    },
    /// `{{if field}}`.
    If {
        /// Field the block depends on.
        field: &'a str,
        /// Original marker text.
        raw: &'a str,
    },
    /// `{{endif}}`.
    EndIf {
        /// Original marker text.
        raw: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// Text the segment stands for when it is not substituted.
    const fn raw(self) -> &'a str {
        match self {
            Self::Text(t) => t,
            Self::Token { raw, .. } | Self::If { raw, .. } | Self::EndIf { raw } => raw,
        }
    }
}

/// Split `template` into literal text and `{{...}}` markers. An unclosed `{{` is literal.
fn tokenize(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        let raw = &rest[start..start + 2 + end + 2];
        let inner = after[..end].trim();
        let seg = if inner == "endif" {
            Segment::EndIf { raw }
        } else if let Some(field) = inner.strip_prefix("if ") {
            Segment::If {
                field: field.trim(),
                raw,
            }
        } else {
            Segment::Token { name: inner, raw }
        };
        out.push(seg);
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// What: First pass. Keep or drop each `{{if field}}...{{endif}}` block.
///
/// Inputs:
/// - `segments`: Tokenized template.
/// - `present`: Whether a field has a value.
///
/// Output:
/// - Segments with conditional markers removed and absent blocks dropped with their contents.
///
/// Details:
/// - A block ends at the first following `{{endif}}`; blocks do not nest.
/// - An `{{if}}` with no `{{endif}}` after it, and a stray `{{endif}}`, stay as literal text.
fn resolve_conditionals<'a>(
    segments: &[Segment<'a>],
    present: &dyn Fn(&str) -> bool,
) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        let seg = segments[i];
        if let Segment::If { field, raw } = seg {
            let close = segments[i + 1..]
                .iter()
                .position(|s| matches!(s, Segment::EndIf { .. }));
            match close {
                Some(off) => {
                    let end = i + 1 + off;
                    if present(field) {
                        out.extend_from_slice(&segments[i + 1..end]);
                    }
                    i = end + 1;
                }
                None => {
                    out.push(Segment::Text(raw));
                    i += 1;
                }
            }
        } else {
            out.push(seg);
            i += 1;
        }
    }
    out
}

/// Second pass: replace known tokens in one left-to-right sweep; unknown tokens stay verbatim.
fn substitute(segments: &[Segment<'_>], lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Token { name, raw } => match lookup(name) {
                Some(v) => out.push_str(&v),
                None => out.push_str(raw),
            },
            other => out.push_str(other.raw()),
        }
    }
    out
}

/// What: Render a template with conditional blocks and token substitution.
///
/// Inputs:
/// - `template`: Template text.
/// - `present`: Whether `{{if field}}` blocks for a field are kept.
/// - `lookup`: Value for a token name, `None` to leave the token untouched.
///
/// Output:
/// - Rendered text.
#[must_use]
pub fn render_template(
    template: &str,
    present: &dyn Fn(&str) -> bool,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> String {
    let segments = tokenize(template);
    let resolved = resolve_conditionals(&segments, present);
    substitute(&resolved, lookup)
}

/// What: Replace every `{{name}}` token with `value`, leaving everything else alone.
///
/// Inputs:
/// - `template`: Template text.
/// - `name`: Token to replace.
/// - `value`: Replacement, inserted without being re-scanned.
///
/// Output:
/// - Rendered text.
#[must_use]
pub fn replace_token(template: &str, name: &str, value: &str) -> String {
    substitute(&tokenize(template), &|n| {
        (n == name).then(|| value.to_string())
    })
}
