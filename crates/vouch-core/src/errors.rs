use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

use crate::diff::model::Divergence;
use crate::equivalence::model::{Mismatch, MismatchKind};

/// Result type alias for assertion calls
pub type Result<T> = std::result::Result<T, AssertionFailure>;

// ========== Failure Facility ==========

/// Canonical failure kind taxonomy
///
/// Every failed assertion is classified by exactly one kind. Each kind maps to
/// a stable code that harnesses can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    // Exact equality
    ValuesDiffer,
    CollectionsDiffer,
    StringsDiffer,
    /// A caller-supplied comparer failed or panicked
    ComparerThrew,

    // Equivalence
    MemberValueDiffers,
    MemberListDiffers,
    CollectionValueMissing,
    ExtraValuesFound,
    GroupingValuesDiffer,
    TypesDiffer,
    CircularReference,
    DepthExceeded,
    /// A parse or compare step inside the equivalence engine failed
    ComparisonThrew,
}

impl FailureKind {
    /// Get the stable failure code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::ValuesDiffer => "ERR_VALUES_DIFFER",
            FailureKind::CollectionsDiffer => "ERR_COLLECTIONS_DIFFER",
            FailureKind::StringsDiffer => "ERR_STRINGS_DIFFER",
            FailureKind::ComparerThrew => "ERR_COMPARER_THREW",
            FailureKind::MemberValueDiffers => "ERR_MEMBER_VALUE_DIFFERS",
            FailureKind::MemberListDiffers => "ERR_MEMBER_LIST_DIFFERS",
            FailureKind::CollectionValueMissing => "ERR_COLLECTION_VALUE_MISSING",
            FailureKind::ExtraValuesFound => "ERR_EXTRA_VALUES_FOUND",
            FailureKind::GroupingValuesDiffer => "ERR_GROUPING_VALUES_DIFFER",
            FailureKind::TypesDiffer => "ERR_TYPES_DIFFER",
            FailureKind::CircularReference => "ERR_CIRCULAR_REFERENCE",
            FailureKind::DepthExceeded => "ERR_DEPTH_EXCEEDED",
            FailureKind::ComparisonThrew => "ERR_COMPARISON_THREW",
        }
    }
}

impl From<MismatchKind> for FailureKind {
    fn from(kind: MismatchKind) -> Self {
        match kind {
            MismatchKind::MemberValueDiffers => FailureKind::MemberValueDiffers,
            MismatchKind::MemberListDiffers => FailureKind::MemberListDiffers,
            MismatchKind::CollectionValueMissing => FailureKind::CollectionValueMissing,
            MismatchKind::ExtraValuesFound => FailureKind::ExtraValuesFound,
            MismatchKind::GroupingValuesDiffer => FailureKind::GroupingValuesDiffer,
            MismatchKind::TypesDiffer => FailureKind::TypesDiffer,
            MismatchKind::CircularReference => FailureKind::CircularReference,
            MismatchKind::DepthExceeded => FailureKind::DepthExceeded,
            MismatchKind::ComparisonThrew => FailureKind::ComparisonThrew,
        }
    }
}

/// Structured assertion failure
///
/// Carries the rendered, user-facing message together with the structured
/// report it was rendered from, so callers can either print it or inspect
/// the mismatch programmatically.
#[derive(Debug, Clone)]
pub struct AssertionFailure {
    kind: FailureKind,
    assertion: &'static str,
    message: String,
    cause: Option<ComparisonError>,
    mismatch: Option<Mismatch>,
    divergence: Option<Divergence>,
}

impl AssertionFailure {
    /// Create a new failure of the given kind raised by `assertion`
    pub fn new(kind: FailureKind, assertion: &'static str) -> Self {
        Self {
            kind,
            assertion,
            message: String::new(),
            cause: None,
            mismatch: None,
            divergence: None,
        }
    }

    /// Set the rendered message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the error raised by a comparison participant
    pub fn with_cause(mut self, cause: Option<ComparisonError>) -> Self {
        self.cause = cause;
        self
    }

    /// Attach the equivalence mismatch this failure was rendered from
    pub fn with_mismatch(mut self, mismatch: Mismatch) -> Self {
        self.mismatch = Some(mismatch);
        self
    }

    /// Attach the sequence divergence this failure was rendered from
    pub fn with_divergence(mut self, divergence: Divergence) -> Self {
        self.divergence = Some(divergence);
        self
    }

    /// Get the failure kind
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Get the stable failure code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Name of the assertion that failed (e.g. `assert_equivalent`)
    pub fn assertion(&self) -> &'static str {
        self.assertion
    }

    /// Get the rendered message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the participant error, if any
    pub fn cause(&self) -> Option<&ComparisonError> {
        self.cause.as_ref()
    }

    /// Get the structured equivalence mismatch, if any
    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_ref()
    }

    /// Get the structured sequence divergence, if any
    pub fn divergence(&self) -> Option<&Divergence> {
        self.divergence.as_ref()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AssertionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

// ========== End Failure Facility ==========

/// Error raised by a comparison participant
///
/// Participants are caller comparers, parse attempts, ordering checks and
/// member getters. These never abort an assertion; they are captured as the
/// cause of the mismatch they interrupted.
#[derive(Error, Debug, Clone)]
pub enum ComparisonError {
    /// A caller comparer reported a failure
    #[error("comparer failed: {message}")]
    Comparer { message: String },

    /// A caller comparer panicked
    #[error("comparer panicked: {message}")]
    Panicked { message: String },

    /// The two values have no common comparison
    #[error("cannot compare {expected_type} with {actual_type}")]
    Incomparable {
        expected_type: String,
        actual_type: String,
    },

    /// Text could not be parsed into the type on the other side
    #[error("could not parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: String,
        reason: String,
    },

    /// Exact comparison nested deeper than the depth limit
    #[error("exceeded the maximum depth {max_depth}")]
    DepthExceeded { max_depth: usize },

    /// Reading a record member failed
    #[error("failed to read member '{member}': {reason}")]
    Getter { member: String, reason: String },

    /// Any other participant error
    #[error("{0}")]
    Custom(Arc<dyn std::error::Error + Send + Sync>),
}

impl ComparisonError {
    /// Shorthand for a comparer failure with a message
    pub fn comparer(message: impl Into<String>) -> Self {
        ComparisonError::Comparer {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error raised by a comparer
    pub fn custom<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ComparisonError::Custom(Arc::new(err))
    }
}

/// Run a caller-supplied comparison, converting a panic into
/// [`ComparisonError::Panicked`].
pub(crate) fn guard_comparer<R>(
    f: impl FnOnce() -> std::result::Result<R, ComparisonError>,
) -> std::result::Result<R, ComparisonError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(ComparisonError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
