//! Sequence differ: first divergence of two ordered sequences.

use tracing::debug;

use super::model::{Divergence, DivergenceKind, Pointer, SideDisplay};
use crate::config::{ELLIPSIS, WINDOW_SIZE};
use crate::errors::{guard_comparer, ComparisonError};
use crate::render;
use crate::value::{Inspect, Value};

/// An ordered sequence as seen by the differ; `items` is `None` for null
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a, T> {
    type_name: &'a str,
    items: Option<&'a [T]>,
}

impl<'a, T> SequenceView<'a, T> {
    pub fn new(type_name: &'a str, items: &'a [T]) -> Self {
        Self {
            type_name,
            items: Some(items),
        }
    }

    pub fn null(type_name: &'a str) -> Self {
        Self {
            type_name,
            items: None,
        }
    }

    pub fn type_name(&self) -> &str {
        self.type_name
    }

    pub fn items(&self) -> Option<&'a [T]> {
        self.items
    }
}

/// Compare two sequences element by element
///
/// Returns `None` when both sequences are equal (two nulls are equal). A
/// comparer that fails or panics stops the walk with
/// [`DivergenceKind::ComparerThrew`]; the error becomes the divergence cause.
pub fn diff_sequences<T, F>(
    expected: SequenceView<'_, T>,
    actual: SequenceView<'_, T>,
    mut compare: F,
) -> Option<Divergence>
where
    T: Inspect,
    F: FnMut(&T, &T) -> Result<bool, ComparisonError>,
{
    let (e, a) = match (expected.items, actual.items) {
        (None, None) => return None,
        (Some(e), Some(a)) => (e, a),
        _ => return Some(null_overrun(&expected, &actual)),
    };

    let mut index = 0;
    let (kind, cause) = loop {
        match (e.get(index), a.get(index)) {
            (None, None) => return None,
            (Some(x), Some(y)) => match guard_comparer(|| compare(x, y)) {
                Ok(true) => index += 1,
                Ok(false) => break (DivergenceKind::ElementMismatch, None),
                Err(err) => break (DivergenceKind::ComparerThrew, Some(err)),
            },
            _ => break (DivergenceKind::LengthOverrun, None),
        }
    };

    let e_items: Vec<Value> = e.iter().map(Inspect::inspect).collect();
    let a_items: Vec<Value> = a.iter().map(Inspect::inspect).collect();
    let e_rendered: Vec<String> = e_items.iter().map(render::format_item).collect();
    let a_rendered: Vec<String> = a_items.iter().map(render::format_item).collect();

    let window = Window::around(index, e.len().max(a.len()));
    let prefixes = TypePrefixes::new(&expected, &actual);

    let mut e_pointer = (index < e.len()).then_some(index);
    let mut a_pointer = (index < a.len()).then_some(index);
    if kind == DivergenceKind::ComparerThrew {
        e_pointer = Some(index);
        a_pointer = Some(index);
    }

    let mut expected_display = window.display(&prefixes.expected, &e_rendered, e_pointer);
    let mut actual_display = window.display(&prefixes.actual, &a_rendered, a_pointer);

    if let (Some(x), Some(y)) = (e_items.get(index), a_items.get(index)) {
        let (x_type, y_type) = (x.type_name(), y.type_name());
        if e_rendered[index] == a_rendered[index] && x_type != y_type {
            if let Some(p) = expected_display.pointer.as_mut() {
                p.type_name = Some(x_type);
            }
            if let Some(p) = actual_display.pointer.as_mut() {
                p.type_name = Some(y_type);
            }
        }
    }

    debug!(kind = ?kind, index, "sequence divergence");

    Some(Divergence {
        kind,
        index: Some(index),
        expected: expected_display,
        actual: actual_display,
        cause,
    })
}

fn null_overrun<T: Inspect>(expected: &SequenceView<'_, T>, actual: &SequenceView<'_, T>) -> Divergence {
    let prefixes = TypePrefixes::new(expected, actual);
    let longest = expected
        .items
        .map_or(0, <[T]>::len)
        .max(actual.items.map_or(0, <[T]>::len));
    let window = Window::around(0, longest);

    let side = |prefix: &str, view: &SequenceView<'_, T>| match view.items {
        None => SideDisplay {
            line: format!("{}null", prefix),
            pointer: None,
        },
        Some(items) => {
            let rendered: Vec<String> = items.iter().map(|i| render::format_item(&i.inspect())).collect();
            window.display(prefix, &rendered, None)
        }
    };

    debug!(kind = ?DivergenceKind::LengthOverrun, "sequence divergence against null");

    Divergence {
        kind: DivergenceKind::LengthOverrun,
        index: None,
        expected: side(&prefixes.expected, expected),
        actual: side(&prefixes.actual, actual),
        cause: None,
    }
}

/// Type-name prefixes, present only when the container types disagree or one
/// side is null
struct TypePrefixes {
    expected: String,
    actual: String,
}

impl TypePrefixes {
    fn new<T>(expected: &SequenceView<'_, T>, actual: &SequenceView<'_, T>) -> Self {
        let one_null = expected.items.is_none() != actual.items.is_none();
        if !one_null && expected.type_name == actual.type_name {
            return Self {
                expected: String::new(),
                actual: String::new(),
            };
        }
        let name = |view: &SequenceView<'_, T>| {
            if view.items.is_some() {
                view.type_name.to_string()
            } else {
                String::new()
            }
        };
        let (e, a) = (name(expected), name(actual));
        let width = e.chars().count().max(a.chars().count());
        Self {
            expected: format!("{:<width$} ", e, width = width),
            actual: format!("{:<width$} ", a, width = width),
        }
    }
}

/// Range of indices shown around a divergence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: usize,
    end: usize,
}

impl Window {
    fn around(index: usize, longest: usize) -> Self {
        let half = WINDOW_SIZE / 2;
        let start = index.saturating_sub(half);
        let end = longest.saturating_sub(1).min(start + WINDOW_SIZE - 1);
        let start = end.saturating_sub(WINDOW_SIZE - 1);
        Self { start, end }
    }

    fn display(&self, prefix: &str, rendered: &[String], pointer: Option<usize>) -> SideDisplay {
        let mut line = String::from(prefix);
        line.push('[');
        let mut column = prefix.chars().count() + 1;

        if rendered.is_empty() {
            line.push(']');
            return SideDisplay {
                line,
                pointer: pointer.map(|index| Pointer {
                    index,
                    column,
                    type_name: None,
                }),
            };
        }

        let shown_end = self.end.min(rendered.len() - 1);
        let leading = format!("{}, ", ELLIPSIS);
        if self.start > 0 {
            line.push_str(&leading);
            column += leading.chars().count();
        }

        let mut pointer_column = None;
        for (i, item) in rendered.iter().enumerate().take(shown_end + 1).skip(self.start) {
            if i > self.start {
                line.push_str(", ");
            }
            if Some(i) == pointer {
                pointer_column = Some(column);
            }
            line.push_str(item);
            column += item.chars().count() + 2;
        }

        if shown_end < rendered.len() - 1 {
            line.push_str(", ");
            line.push_str(ELLIPSIS);
        }
        line.push(']');

        // A pointer past the last element sits where the next element would be
        let pointer = pointer.map(|index| Pointer {
            index,
            column: pointer_column.unwrap_or(column.saturating_sub(2)),
            type_name: None,
        });
        SideDisplay { line, pointer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_ints(expected: &[i32], actual: &[i32]) -> Option<Divergence> {
        diff_sequences(
            SequenceView::new("Vec<i32>", expected),
            SequenceView::new("Vec<i32>", actual),
            |a, b| Ok(a == b),
        )
    }

    #[test]
    fn test_equal_sequences() {
        assert!(diff_ints(&[1, 2, 3], &[1, 2, 3]).is_none());
        assert!(diff_ints(&[], &[]).is_none());
    }

    #[test]
    fn test_two_nulls_are_equal() {
        let result = diff_sequences::<i32, _>(
            SequenceView::null("Vec<i32>"),
            SequenceView::null("Vec<i32>"),
            |a, b| Ok(a == b),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_mismatch_in_the_middle_is_windowed() {
        let d = diff_ints(&[1, 2, 3, 4, 5, 6, 7], &[1, 2, 3, 99, 5, 6, 7]).unwrap();
        assert_eq!(d.kind, DivergenceKind::ElementMismatch);
        assert_eq!(d.index, Some(3));
        assert_eq!(d.expected.line, "[···, 2, 3, 4, 5, 6, ···]");
        assert_eq!(d.actual.line, "[···, 2, 3, 99, 5, 6, ···]");
        assert_eq!(d.expected.pointer.as_ref().map(|p| p.column), Some(12));
        assert_eq!(d.actual.pointer.as_ref().map(|p| p.column), Some(12));
    }

    #[test]
    fn test_mismatch_at_start() {
        let d = diff_ints(&[1, 2, 3], &[9, 2, 3]).unwrap();
        assert_eq!(d.expected.line, "[1, 2, 3]");
        assert_eq!(d.expected.pointer.map(|p| p.column), Some(1));
    }

    #[test]
    fn test_overrun_points_only_at_longer_side() {
        let d = diff_ints(&[1, 2, 3], &[1, 2, 3, 4]).unwrap();
        assert_eq!(d.kind, DivergenceKind::LengthOverrun);
        assert!(d.expected.pointer.is_none());
        let pointer = d.actual.pointer.unwrap();
        assert_eq!(pointer.index, 3);
        assert_eq!(d.actual.line, "[1, 2, 3, 4]");
        assert_eq!(pointer.column, 10);
    }

    #[test]
    fn test_one_null_side_is_overrun_without_pointers() {
        let d = diff_sequences(
            SequenceView::null("Vec<i32>"),
            SequenceView::new("Vec<i32>", &[1, 2, 3][..]),
            |a: &i32, b: &i32| Ok(a == b),
        )
        .unwrap();
        assert_eq!(d.kind, DivergenceKind::LengthOverrun);
        assert!(d.expected.pointer.is_none() && d.actual.pointer.is_none());
        assert_eq!(d.expected.line, "         null");
        assert_eq!(d.actual.line, "Vec<i32> [1, 2, 3]");
    }

    #[test]
    fn test_type_prefix_when_container_types_differ() {
        let d = diff_sequences(
            SequenceView::new("[i32; 2]", &[1, 2][..]),
            SequenceView::new("Vec<i32>", &[1, 3][..]),
            |a, b| Ok(a == b),
        )
        .unwrap();
        assert_eq!(d.expected.line, "[i32; 2] [1, 2]");
        assert_eq!(d.actual.line, "Vec<i32> [1, 3]");
        assert_eq!(d.expected.pointer.map(|p| p.column), Some(13));
    }

    #[test]
    fn test_comparer_failure_points_at_both_sides() {
        let d = diff_sequences(
            SequenceView::new("Vec<i32>", &[1, 2][..]),
            SequenceView::new("Vec<i32>", &[1, 2][..]),
            |a: &i32, _| {
                if *a == 2 {
                    Err(ComparisonError::comparer("bad element"))
                } else {
                    Ok(true)
                }
            },
        )
        .unwrap();
        assert_eq!(d.kind, DivergenceKind::ComparerThrew);
        assert_eq!(d.index, Some(1));
        assert!(d.expected.pointer.is_some() && d.actual.pointer.is_some());
        assert!(d.cause.is_some());
    }

    #[test]
    fn test_panicking_comparer_is_a_failure() {
        let d = diff_sequences(
            SequenceView::new("Vec<i32>", &[1][..]),
            SequenceView::new("Vec<i32>", &[1][..]),
            |_: &i32, _: &i32| -> Result<bool, ComparisonError> { panic!("kaboom") },
        )
        .unwrap();
        assert_eq!(d.kind, DivergenceKind::ComparerThrew);
        assert!(matches!(d.cause, Some(ComparisonError::Panicked { .. })));
    }

    #[test]
    fn test_identical_rendering_gets_type_note() {
        let expected = vec![Value::from(1i32), Value::from(2i32)];
        let actual = vec![Value::from(1i32), Value::from(2i64)];
        let d = diff_sequences(
            SequenceView::new("Vec<Value>", &expected),
            SequenceView::new("Vec<Value>", &actual),
            |a, b| crate::capability::values_equal(a, b),
        )
        .unwrap();
        assert_eq!(d.expected.pointer.unwrap().note(), "(pos 1, type i32)");
        assert_eq!(d.actual.pointer.unwrap().note(), "(pos 1, type i64)");
    }

    #[test]
    fn test_window_near_end() {
        let w = Window::around(9, 10);
        assert_eq!(w, Window { start: 5, end: 9 });
        let w = Window::around(0, 3);
        assert_eq!(w, Window { start: 0, end: 2 });
    }
}
