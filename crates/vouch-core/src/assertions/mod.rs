//! Public assertions.
//!
//! Each assertion returns `Ok(())` or a single [`AssertionFailure`] carrying
//! the rendered message, the failure kind and the structured report it was
//! rendered from. The [`assert_equal!`](crate::assert_equal) and
//! [`assert_equivalent!`](crate::assert_equivalent) macros panic with the
//! message instead.
//!
//! ## Entry point
//!
//! ```
//! use vouch_core::assertions::{equal, equivalent};
//! use vouch_core::errors::FailureKind;
//!
//! let failure = equal(&vec![1, 2, 3, 4, 5, 6, 7], &vec![1, 2, 3, 99, 5, 6, 7]).unwrap_err();
//! assert_eq!(failure.kind(), FailureKind::CollectionsDiffer);
//!
//! assert!(equivalent(&vec![1, 9, 4], &vec![4, 1, 9], true).is_ok());
//! ```
//!
//! Every call logs `start` and either `end` or `end_error` under its op name.

pub mod macros;
pub mod message;

use std::time::Instant;

use tracing::debug;

use vouch_core_types::schema::{OP_ASSERT_EQUAL, OP_ASSERT_EQUIVALENT};

use crate::capability::{resolve_strategy, values_equal};
use crate::classify::{kind_of, Kind};
use crate::diff::{diff_sequences, diff_strings, Divergence, DivergenceKind, SequenceView};
use crate::equivalence::{self, EquivalenceOptions, ExclusionSet, Mismatch};
use crate::errors::{guard_comparer, AssertionFailure, ComparisonError, FailureKind, Result};
use crate::render;
use crate::value::{short_type_name, Inspect, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use message::{
    depth_reason, divergence_message, mismatch_message, values_message, REASON_COLLECTIONS_DIFFER,
    REASON_COMPARISON_THREW, REASON_STRINGS_DIFFER, REASON_VALUES_DIFFER,
};

/// Exact equality
///
/// Sequences go through the sequence differ and strings through the string
/// differ, both with pointers at the first divergence. Sets and maps report
/// "Collections differ" without pointers; anything else "Values differ".
///
/// # Errors
///
/// Returns an [`AssertionFailure`] when the values are not equal.
pub fn equal<E, A>(expected: &E, actual: &A) -> Result<()>
where
    E: Inspect + ?Sized,
    A: Inspect + ?Sized,
{
    let started = Instant::now();
    log_op_start!(OP_ASSERT_EQUAL);
    let result = check_equal(&settle(expected.inspect()), &settle(actual.inspect()));
    finish(OP_ASSERT_EQUAL, started, result)
}

/// Exact equality decided by a whole-value comparer
///
/// A comparer that returns an error or panics is reported as "Exception
/// thrown during comparison", with the error as the failure cause.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] when the comparer returns `false` or fails.
pub fn equal_with<T, F>(expected: &T, actual: &T, comparer: F) -> Result<()>
where
    T: Inspect + ?Sized,
    F: FnOnce(&T, &T) -> std::result::Result<bool, ComparisonError>,
{
    let started = Instant::now();
    log_op_start!(OP_ASSERT_EQUAL, comparer = true);
    let (e, a) = (expected.inspect(), actual.inspect());
    let result = match guard_comparer(|| comparer(expected, actual)) {
        Ok(true) => Ok(()),
        Ok(false) => Err(values_failure(&e, &a)),
        Err(cause) => Err(threw_failure(&e, &a, cause)),
    };
    finish(OP_ASSERT_EQUAL, started, result)
}

/// Element-wise equality of two slices under a predicate
///
/// # Errors
///
/// Returns an [`AssertionFailure`] at the first element pair the predicate
/// rejects, or when the slices differ in length.
pub fn equal_by<T, F>(expected: &[T], actual: &[T], mut predicate: F) -> Result<()>
where
    T: Inspect,
    F: FnMut(&T, &T) -> bool,
{
    try_equal_by(expected, actual, |e, a| Ok(predicate(e, a)))
}

/// [`equal_by`] with a fallible predicate
///
/// # Errors
///
/// Returns an [`AssertionFailure`] at the first element pair the predicate
/// rejects or fails on, or when the slices differ in length.
pub fn try_equal_by<T, F>(expected: &[T], actual: &[T], predicate: F) -> Result<()>
where
    T: Inspect,
    F: FnMut(&T, &T) -> std::result::Result<bool, ComparisonError>,
{
    let started = Instant::now();
    log_op_start!(OP_ASSERT_EQUAL, expected_len = expected.len(), actual_len = actual.len());
    let type_name = short_type_name::<[T]>();
    let divergence = diff_sequences(
        SequenceView::new(&type_name, expected),
        SequenceView::new(&type_name, actual),
        predicate,
    );
    let result = match divergence {
        Some(divergence) => Err(sequence_failure(divergence)),
        None => Ok(()),
    };
    finish(OP_ASSERT_EQUAL, started, result)
}

/// Deep equivalence with default options
///
/// Non-strict comparison lets `actual` carry extra members and extra
/// collection elements; strict comparison requires exact parity.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] describing the first mismatch found.
pub fn equivalent<E, A>(expected: &E, actual: &A, strict: bool) -> Result<()>
where
    E: Inspect + ?Sized,
    A: Inspect + ?Sized,
{
    equivalent_with(expected, actual, &EquivalenceOptions::new().with_strict(strict))
}

/// Non-strict deep equivalence, skipping the given member paths
///
/// Paths are dot-joined member names from the root (`Shallow.Value1`) and
/// match exactly.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] describing the first mismatch found.
pub fn equivalent_with_exclusions<E, A, I, S>(expected: &E, actual: &A, paths: I) -> Result<()>
where
    E: Inspect + ?Sized,
    A: Inspect + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let exclusions: ExclusionSet = paths.into_iter().collect();
    equivalent_with(
        expected,
        actual,
        &EquivalenceOptions::new().with_exclusions(exclusions),
    )
}

/// Deep equivalence with full options
///
/// # Errors
///
/// Returns an [`AssertionFailure`] describing the first mismatch found.
pub fn equivalent_with<E, A>(expected: &E, actual: &A, options: &EquivalenceOptions) -> Result<()>
where
    E: Inspect + ?Sized,
    A: Inspect + ?Sized,
{
    let started = Instant::now();
    log_op_start!(
        OP_ASSERT_EQUIVALENT,
        strict = options.is_strict(),
        max_depth = options.max_depth()
    );
    let result = equivalence::equivalent(&expected.inspect(), &actual.inspect(), options)
        .map_err(mismatch_failure);
    finish(OP_ASSERT_EQUIVALENT, started, result)
}

fn check_equal(expected: &Value, actual: &Value) -> Result<()> {
    match (expected, actual) {
        (Value::Null, Value::Null) => Ok(()),
        (Value::Seq(_) | Value::Null, Value::Seq(_) | Value::Null) => {
            let divergence =
                diff_sequences(sequence_view(expected), sequence_view(actual), values_equal);
            divergence.map_or(Ok(()), |d| Err(sequence_failure(d)))
        }
        (Value::Str(_) | Value::Null, Value::Str(_) | Value::Null) => {
            let divergence = diff_strings(as_str(expected), as_str(actual));
            divergence.map_or(Ok(()), |d| Err(string_failure(d)))
        }
        _ => {
            debug!(strategy = ?resolve_strategy(expected, actual, false), "exact comparison");
            match values_equal(expected, actual) {
                Ok(true) => Ok(()),
                Ok(false) => Err(values_failure(expected, actual)),
                Err(ComparisonError::DepthExceeded { max_depth }) => {
                    Err(depth_failure(expected, actual, max_depth))
                }
                Err(cause) => Err(threw_failure(expected, actual, cause)),
            }
        }
    }
}

fn settle(value: Value) -> Value {
    match value {
        Value::Lazy(lazy) => settle(lazy.force()),
        other => other,
    }
}

fn sequence_view(value: &Value) -> SequenceView<'_, Value> {
    match value {
        Value::Seq(c) => SequenceView::new(c.type_name(), c.items()),
        _ => SequenceView::null(""),
    }
}

fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::Str(s) => Some(s.as_str()),
        _ => None,
    }
}

fn is_collection(value: &Value) -> bool {
    let kind = kind_of(value);
    kind.is_collection() || matches!(kind, Kind::Dictionary | Kind::Grouping)
}

fn sequence_failure(divergence: Divergence) -> AssertionFailure {
    let (kind, reason) = match (divergence.kind, &divergence.cause) {
        (DivergenceKind::ComparerThrew, Some(ComparisonError::DepthExceeded { max_depth })) => {
            (FailureKind::DepthExceeded, depth_reason(*max_depth))
        }
        (DivergenceKind::ComparerThrew, _) => {
            (FailureKind::ComparerThrew, REASON_COMPARISON_THREW.to_string())
        }
        _ => (FailureKind::CollectionsDiffer, REASON_COLLECTIONS_DIFFER.to_string()),
    };
    AssertionFailure::new(kind, OP_ASSERT_EQUAL)
        .with_message(divergence_message(OP_ASSERT_EQUAL, &reason, &divergence))
        .with_cause(divergence.cause.clone())
        .with_divergence(divergence)
}

fn string_failure(divergence: Divergence) -> AssertionFailure {
    AssertionFailure::new(FailureKind::StringsDiffer, OP_ASSERT_EQUAL)
        .with_message(divergence_message(OP_ASSERT_EQUAL, REASON_STRINGS_DIFFER, &divergence))
        .with_divergence(divergence)
}

fn values_failure(expected: &Value, actual: &Value) -> AssertionFailure {
    let (kind, reason) = if is_collection(expected) && is_collection(actual) {
        (FailureKind::CollectionsDiffer, REASON_COLLECTIONS_DIFFER)
    } else {
        (FailureKind::ValuesDiffer, REASON_VALUES_DIFFER)
    };
    AssertionFailure::new(kind, OP_ASSERT_EQUAL).with_message(values_message(
        OP_ASSERT_EQUAL,
        Some(reason),
        &render::format(expected),
        &render::format(actual),
    ))
}

fn threw_failure(expected: &Value, actual: &Value, cause: ComparisonError) -> AssertionFailure {
    AssertionFailure::new(FailureKind::ComparerThrew, OP_ASSERT_EQUAL)
        .with_message(values_message(
            OP_ASSERT_EQUAL,
            Some(REASON_COMPARISON_THREW),
            &render::format(expected),
            &render::format(actual),
        ))
        .with_cause(Some(cause))
}

fn depth_failure(expected: &Value, actual: &Value, max_depth: usize) -> AssertionFailure {
    AssertionFailure::new(FailureKind::DepthExceeded, OP_ASSERT_EQUAL)
        .with_message(values_message(
            OP_ASSERT_EQUAL,
            Some(&depth_reason(max_depth)),
            &render::format(expected),
            &render::format(actual),
        ))
        .with_cause(Some(ComparisonError::DepthExceeded { max_depth }))
}

fn mismatch_failure(mismatch: Mismatch) -> AssertionFailure {
    AssertionFailure::new(mismatch.kind().into(), OP_ASSERT_EQUIVALENT)
        .with_message(mismatch_message(OP_ASSERT_EQUIVALENT, &mismatch))
        .with_cause(mismatch.cause.clone())
        .with_mismatch(mismatch)
}

fn finish(op: &'static str, started: Instant, result: Result<()>) -> Result<()> {
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(failure) => {
            log_op_error!(op, failure, duration_ms = duration_ms);
        }
    }
    result
}
