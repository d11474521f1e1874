//! Equivalence mismatch report types.
//!
//! A comparison yields at most one [`Mismatch`]: the first failure in
//! traversal order. Displays are rendered at the point of failure so the
//! report stays valid after the compared graphs are dropped.

use serde::{Deserialize, Serialize};
use vouch_core_types::Side;

use super::path::Path;
use crate::errors::ComparisonError;

/// Classification of an equivalence failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    MemberValueDiffers,
    MemberListDiffers,
    CollectionValueMissing,
    ExtraValuesFound,
    GroupingValuesDiffer,
    TypesDiffer,
    CircularReference,
    DepthExceeded,
    ComparisonThrew,
}

/// Kind-specific payload of a mismatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchDetail {
    /// Two values at the same path are not equivalent
    MemberValueDiffers {
        /// Rendered expected value
        expected: String,
        /// Rendered actual value
        actual: String,
    },
    /// Record member names differ
    MemberListDiffers {
        /// Sorted, path-qualified expected member names
        expected: Vec<String>,
        /// Sorted, path-qualified actual member names
        actual: Vec<String>,
    },
    /// An expected element has no equivalent in the actual collection
    CollectionValueMissing {
        /// Rendered missing element (or `[key] = value` entry)
        expected: String,
        /// Rendered actual collection that was searched
        actual: String,
    },
    /// Strict comparison left unmatched actual elements
    ExtraValuesFound {
        /// Rendered expected collection
        expected: String,
        /// Rendered unmatched actual elements
        leftovers: String,
        /// Rendered actual collection
        actual: String,
    },
    /// A grouping key matched but its values did not
    GroupingValuesDiffer {
        /// Rendered grouping key
        key: String,
        /// Rendered expected values
        expected: String,
        /// Rendered actual values
        actual: String,
    },
    /// The two values have incompatible shapes or nominal types
    TypesDiffer {
        /// Expected type name
        expected: String,
        /// Actual type name
        actual: String,
    },
    /// One side revisited a reference already on its traversal stack
    CircularReference {
        /// Side whose graph contains the cycle
        side: Side,
    },
    /// Recursion went past the configured limit
    DepthExceeded {
        /// The configured limit
        max_depth: usize,
    },
    /// A parse, compare or getter step failed
    ComparisonThrew {
        /// Rendered expected value
        expected: String,
        /// Rendered actual value
        actual: String,
    },
}

impl MismatchDetail {
    pub fn kind(&self) -> MismatchKind {
        match self {
            MismatchDetail::MemberValueDiffers { .. } => MismatchKind::MemberValueDiffers,
            MismatchDetail::MemberListDiffers { .. } => MismatchKind::MemberListDiffers,
            MismatchDetail::CollectionValueMissing { .. } => MismatchKind::CollectionValueMissing,
            MismatchDetail::ExtraValuesFound { .. } => MismatchKind::ExtraValuesFound,
            MismatchDetail::GroupingValuesDiffer { .. } => MismatchKind::GroupingValuesDiffer,
            MismatchDetail::TypesDiffer { .. } => MismatchKind::TypesDiffer,
            MismatchDetail::CircularReference { .. } => MismatchKind::CircularReference,
            MismatchDetail::DepthExceeded { .. } => MismatchKind::DepthExceeded,
            MismatchDetail::ComparisonThrew { .. } => MismatchKind::ComparisonThrew,
        }
    }
}

/// The first equivalence failure found
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    /// Member path from the root; containers report their own path
    pub path: Path,
    /// What went wrong, with rendered displays
    pub detail: MismatchDetail,
    /// Participant error behind a `ComparisonThrew`
    #[serde(skip)]
    pub cause: Option<ComparisonError>,
}

impl Mismatch {
    pub fn new(path: Path, detail: MismatchDetail) -> Self {
        Self {
            path,
            detail,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ComparisonError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn kind(&self) -> MismatchKind {
        self.detail.kind()
    }

    /// Mismatches that abort the enclosing collection search instead of
    /// meaning "this candidate does not match"
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            MismatchKind::DepthExceeded | MismatchKind::CircularReference
        )
    }
}
