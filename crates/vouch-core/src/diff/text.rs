//! String differ: first divergent character of two strings.
//!
//! Strings are quoted and escaped. A string longer than
//! [`MAX_STRING_LENGTH`] characters is cut to a window of that many
//! characters around the divergence, with `···` marking each cut end:
//!
//! ```text
//! Expected: ···"s (x86)\\Common Files\\Extremely Long Path Name\\VST2"
//! Expected: "Why hello there world, you're a long string with s"···
//! ```
//!
//! Pointer columns count the escaped width of the shown characters before the
//! divergence, so a caret lands on the right character even after `\n` or
//! `\t` sequences.

use tracing::debug;

use super::model::{Divergence, DivergenceKind, Pointer, SideDisplay};
use crate::config::{ELLIPSIS, MAX_STRING_LENGTH};
use crate::render::escape_char;

/// Characters kept before the divergence when the start of a string is cut
const LEADING_CONTEXT: usize = MAX_STRING_LENGTH / 2;

/// Compare two strings; `None` stands for a null string
///
/// Returns `None` when both are equal (two nulls are equal).
pub fn diff_strings(expected: Option<&str>, actual: Option<&str>) -> Option<Divergence> {
    let (e, a) = match (expected, actual) {
        (None, None) => return None,
        (Some(e), Some(a)) => (e, a),
        _ => {
            let side = |s: Option<&str>| SideDisplay {
                line: s.map_or_else(
                    || "null".to_string(),
                    |s| window(&s.chars().collect::<Vec<_>>(), 0).0,
                ),
                pointer: None,
            };
            debug!(kind = ?DivergenceKind::LengthOverrun, "string divergence against null");
            return Some(Divergence {
                kind: DivergenceKind::LengthOverrun,
                index: None,
                expected: side(expected),
                actual: side(actual),
                cause: None,
            });
        }
    };

    let e_chars: Vec<char> = e.chars().collect();
    let a_chars: Vec<char> = a.chars().collect();
    let index = e_chars
        .iter()
        .zip(&a_chars)
        .take_while(|(x, y)| x == y)
        .count();
    if index == e_chars.len() && index == a_chars.len() {
        return None;
    }

    let kind = if index < e_chars.len() && index < a_chars.len() {
        DivergenceKind::ElementMismatch
    } else {
        DivergenceKind::LengthOverrun
    };

    let side = |chars: &[char]| {
        let (line, column) = window(chars, index);
        SideDisplay {
            line,
            pointer: (index < chars.len()).then_some(Pointer {
                index,
                column,
                type_name: None,
            }),
        }
    };

    debug!(kind = ?kind, index, "string divergence");

    Some(Divergence {
        kind,
        index: Some(index),
        expected: side(&e_chars),
        actual: side(&a_chars),
        cause: None,
    })
}

/// Quote the window of `chars` around `index`
///
/// Returns the display line and the column of the character at `index`.
fn window(chars: &[char], index: usize) -> (String, usize) {
    let mut start = index.saturating_sub(LEADING_CONTEXT);
    let end = (start + MAX_STRING_LENGTH).min(chars.len());
    start = start.min(end.saturating_sub(MAX_STRING_LENGTH));

    let mut line = String::new();
    if start > 0 {
        line.push_str(ELLIPSIS);
    }
    line.push('"');
    let mut column = line.chars().count();
    for (at, ch) in chars[start..end].iter().enumerate() {
        let escaped = escape_char(*ch, '"');
        if start + at < index {
            column += escaped.chars().count();
        }
        line.push_str(&escaped);
    }
    line.push('"');
    if end < chars.len() {
        line.push_str(ELLIPSIS);
    }
    (line, column)
}
