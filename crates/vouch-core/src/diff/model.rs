//! Sequence and string divergence output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize`. The participant
//! error of a `ComparerThrew` divergence is not serialized.

use serde::{Deserialize, Serialize};

use crate::errors::ComparisonError;

/// Why two sequences stopped matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// Both sides have an element at the divergence index and they differ
    ElementMismatch,
    /// One side ended first, or exactly one side is null
    LengthOverrun,
    /// The element comparer failed at the divergence index
    ComparerThrew,
}

/// Caret marking the divergent element in a display line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pointer {
    /// Index of the element in its sequence
    pub index: usize,
    /// Char offset of the element from the start of the display line
    pub column: usize,
    /// Runtime type of the element, set when both sides render identically
    pub type_name: Option<String>,
}

impl Pointer {
    /// The annotation printed after the caret: `(pos 3)` or `(pos 3, type i64)`
    pub fn note(&self) -> String {
        match &self.type_name {
            Some(type_name) => format!("(pos {}, type {})", self.index, type_name),
            None => format!("(pos {})", self.index),
        }
    }
}

/// One side of a divergence as it is displayed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideDisplay {
    /// Rendered, windowed value text
    pub line: String,
    /// Caret for this side; absent when this side has no element to point at
    pub pointer: Option<Pointer>,
}

/// First point at which two sequences (or strings) stop matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divergence {
    /// Classification of the divergence
    pub kind: DivergenceKind,
    /// Forward index of the first divergent position; absent when a side is null
    pub index: Option<usize>,
    /// Expected side display
    pub expected: SideDisplay,
    /// Actual side display
    pub actual: SideDisplay,
    /// Error raised by the comparer, for `ComparerThrew`
    #[serde(skip)]
    pub cause: Option<ComparisonError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_note() {
        let plain = Pointer {
            index: 3,
            column: 12,
            type_name: None,
        };
        assert_eq!(plain.note(), "(pos 3)");

        let typed = Pointer {
            type_name: Some("i64".to_string()),
            ..plain
        };
        assert_eq!(typed.note(), "(pos 3, type i64)");
    }

    #[test]
    fn test_divergence_serializes_without_cause() {
        let divergence = Divergence {
            kind: DivergenceKind::ComparerThrew,
            index: Some(0),
            expected: SideDisplay {
                line: "[1]".to_string(),
                pointer: None,
            },
            actual: SideDisplay {
                line: "[2]".to_string(),
                pointer: None,
            },
            cause: Some(ComparisonError::comparer("boom")),
        };
        let json = serde_json::to_value(&divergence).unwrap();
        assert_eq!(json["kind"], "comparer_threw");
        assert!(json.get("cause").is_none());
    }
}
