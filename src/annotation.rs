//! Candidate resolution from annotation comments.
//!
//! The candidates for a substitution site always come from the line directly
//! above it. The annotation is a `;` comment segment of the form
//! `%N=v1,v2,...`:
//!
//! ```text
//! ; %1=r0,r1,r2
//! add %1, r2, r3
//! ```
//!
//! Only that one line is ever inspected.

use crate::placeholder::Placeholder;

/// Split a comment line into candidate values for `placeholder`.
///
/// The first `;`-separated segment mentioning the placeholder is used. Its
/// text after `<token>=` is trimmed and split on `,`; empty candidates are
/// kept as literal empty strings. Returns `None` when no segment mentions the
/// placeholder, when that segment has no `<token>=`, or when nothing follows it.
pub fn parse_candidates(line: &str, placeholder: &Placeholder) -> Option<Vec<String>> {
    let segment = line.split(';').find(|s| placeholder.occurs_in(s))?;
    let value_start = placeholder
        .occurrences(segment)
        .map(|at| at + placeholder.as_str().len())
        .find(|&end| segment[end..].starts_with('='))?
        + 1;

    let values = segment[value_start..].trim();
    if values.is_empty() {
        return None;
    }
    Some(values.split(',').map(str::to_owned).collect())
}

/// Resolve the candidates for a placeholder occurring on line `index`.
///
/// Looks at `lines[index - 1]` only; the first line never resolves.
pub fn resolve(lines: &[String], index: usize, placeholder: &Placeholder) -> Option<Vec<String>> {
    let above = lines.get(index.checked_sub(1)?)?;
    parse_candidates(above, placeholder)
}
