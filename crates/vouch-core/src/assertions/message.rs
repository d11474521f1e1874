//! Failure message rendering.
//!
//! ```text
//! assert_equal() Failure: Collections differ
//!                ↓ (pos 3)
//! Expected: [···, 2, 3, 4, 5, 6, ···]
//! Actual:   [···, 2, 3, 99, 5, 6, ···]
//!                ↑ (pos 3)
//! ```

use crate::diff::model::{Divergence, Pointer};
use crate::equivalence::model::{Mismatch, MismatchDetail};
use crate::equivalence::path::Path;
use crate::render;

/// Width of the `Expected: `, `Actual:   ` and `In:       ` labels
pub const LABEL_WIDTH: usize = 10;

const TYPE_LABEL_WIDTH: usize = 15;

pub const REASON_COLLECTIONS_DIFFER: &str = "Collections differ";
pub const REASON_STRINGS_DIFFER: &str = "Strings differ";
pub const REASON_VALUES_DIFFER: &str = "Values differ";
pub const REASON_COMPARISON_THREW: &str = "Exception thrown during comparison";

/// Reason for exact equality that gave up at the depth limit
pub fn depth_reason(max_depth: usize) -> String {
    format!(
        "Exceeded the maximum depth {}; check for infinite recursion or circular references",
        max_depth
    )
}

/// Line-oriented builder for one failure message
struct Message {
    lines: Vec<String>,
}

impl Message {
    fn new(assertion: &str, reason: Option<&str>) -> Self {
        let header = match reason {
            Some(reason) => format!("{}() Failure: {}", assertion, reason),
            None => format!("{}() Failure", assertion),
        };
        Self { lines: vec![header] }
    }

    fn pointer(mut self, arrow: char, pointer: Option<&Pointer>) -> Self {
        if let Some(p) = pointer {
            self.lines.push(format!(
                "{}{} {}",
                " ".repeat(LABEL_WIDTH + p.column),
                arrow,
                p.note()
            ));
        }
        self
    }

    /// A labelled value; continuation lines are indented to the label width
    fn field(mut self, label: &str, width: usize, value: &str) -> Self {
        let indent = " ".repeat(width);
        for (i, line) in value.split('\n').enumerate() {
            if i == 0 {
                self.lines.push(format!("{:<width$}{}", label, line, width = width));
            } else {
                self.lines.push(format!("{}{}", indent, line));
            }
        }
        self
    }

    fn expected(self, value: &str) -> Self {
        self.field("Expected:", LABEL_WIDTH, value)
    }

    fn actual(self, value: &str) -> Self {
        self.field("Actual:", LABEL_WIDTH, value)
    }

    fn build(self) -> String {
        self.lines.join("\n")
    }
}

/// Message for a sequence or string divergence, with pointer lines
pub fn divergence_message(assertion: &str, reason: &str, divergence: &Divergence) -> String {
    Message::new(assertion, Some(reason))
        .pointer('↓', divergence.expected.pointer.as_ref())
        .expected(&divergence.expected.line)
        .actual(&divergence.actual.line)
        .pointer('↑', divergence.actual.pointer.as_ref())
        .build()
}

/// Message showing two rendered values without pointers
pub fn values_message(assertion: &str, reason: Option<&str>, expected: &str, actual: &str) -> String {
    Message::new(assertion, reason)
        .expected(expected)
        .actual(actual)
        .build()
}

/// Message for an equivalence mismatch
pub fn mismatch_message(assertion: &str, mismatch: &Mismatch) -> String {
    let path = &mismatch.path;
    match &mismatch.detail {
        MismatchDetail::MemberValueDiffers { expected, actual }
        | MismatchDetail::ComparisonThrew { expected, actual } => {
            let reason = (!path.is_root()).then(|| format!("Mismatched value on member '{}'", path));
            values_message(assertion, reason.as_deref(), expected, actual)
        }
        MismatchDetail::MemberListDiffers { expected, actual } => Message::new(assertion, Some("Mismatched member list"))
            .expected(&render::format_names(expected))
            .actual(&render::format_names(actual))
            .build(),
        MismatchDetail::CollectionValueMissing { expected, actual } => {
            let reason = in_member("Collection value not found", path);
            Message::new(assertion, Some(&reason))
                .expected(expected)
                .field("In:", LABEL_WIDTH, actual)
                .build()
        }
        MismatchDetail::ExtraValuesFound {
            expected,
            leftovers,
            actual,
        } => {
            let reason = in_member("Extra values found", path);
            Message::new(assertion, Some(&reason))
                .expected(expected)
                .actual(&format!("{} left over from {}", leftovers, actual))
                .build()
        }
        MismatchDetail::GroupingValuesDiffer { key, expected, actual } => {
            let reason = in_member(&format!("Grouping key [{}] has mismatched values", key), path);
            values_message(assertion, Some(&reason), expected, actual)
        }
        MismatchDetail::TypesDiffer { expected, actual } => {
            let reason = in_member("Types did not match", path);
            Message::new(assertion, Some(&reason))
                .field("Expected type:", TYPE_LABEL_WIDTH, expected)
                .field("Actual type:", TYPE_LABEL_WIDTH, actual)
                .build()
        }
        MismatchDetail::CircularReference { side } => {
            let location = if path.is_root() {
                side.label().to_string()
            } else {
                format!("{}.{}", side, path)
            };
            Message::new(
                assertion,
                Some(&format!("Circular reference found in '{}'", location)),
            )
            .build()
        }
        MismatchDetail::DepthExceeded { max_depth } => Message::new(
            assertion,
            Some(&format!(
                "Exceeded the maximum depth {} with '{}'; check for infinite recursion or circular references",
                max_depth, path
            )),
        )
        .build(),
    }
}

fn in_member(reason: &str, path: &Path) -> String {
    if path.is_root() {
        reason.to_string()
    } else {
        format!("{} in member '{}'", reason, path)
    }
}
