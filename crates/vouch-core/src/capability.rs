//! Capability resolver for exact equality.
//!
//! Picks how two values are compared, in priority order:
//!
//! 1. a caller-supplied comparer
//! 2. type-specific value equality ([`try_value_equals`])
//! 3. type-specific ordering ([`try_ordering_compare`])
//! 4. structural comparison
//!
//! The two `try_*` probes answer `None` when the capability does not apply;
//! they never fail on inapplicable input.

use std::cmp::Ordering;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::errors::ComparisonError;
use crate::value::{Collection, MemberFilter, PublicInstanceMembers, Structural, Value};

/// Strategy chosen for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Comparer,
    ValueEquality,
    Ordering,
    Structural,
}

/// Decide which strategy compares `expected` with `actual`
pub fn resolve_strategy(expected: &Value, actual: &Value, comparer_supplied: bool) -> Strategy {
    if comparer_supplied {
        Strategy::Comparer
    } else if try_value_equals(expected, actual).is_some() {
        Strategy::ValueEquality
    } else if try_ordering_compare(expected, actual).is_some() {
        Strategy::Ordering
    } else {
        Strategy::Structural
    }
}

/// Type-specific value equality, if the pair has one
pub fn try_value_equals(expected: &Value, actual: &Value) -> Option<Result<bool, ComparisonError>> {
    match (expected, actual) {
        (Value::Scalar(a), Value::Scalar(b)) => Some(Ok(a.exact_eq(b))),
        (Value::Str(a), Value::Str(b)) => Some(Ok(a == b)),
        (Value::Special(a), Value::Special(b)) if a.kind() == b.kind() => Some(a.equals(b)),
        (Value::Record(a), Value::Record(b)) => a.value_equals(b.as_ref()),
        _ => None,
    }
}

/// Type-specific ordering, if the pair has one
pub fn try_ordering_compare(
    expected: &Value,
    actual: &Value,
) -> Option<Result<Ordering, ComparisonError>> {
    match (expected, actual) {
        (Value::Scalar(a), Value::Scalar(b)) => a.partial_cmp_exact(b).map(Ok),
        (Value::Special(a), Value::Special(b)) => a.compare(b).ok().flatten().map(Ok),
        (Value::Record(a), Value::Record(b)) => a.ordering(b.as_ref()),
        _ => None,
    }
}

/// Exact equality of two values without a caller comparer
///
/// # Errors
///
/// Returns the error raised by a type-specific equality or ordering, or by a
/// failing member getter during structural comparison.
/// [`ComparisonError::DepthExceeded`] is returned when containers nest more
/// than [`DEFAULT_MAX_DEPTH`] levels deep.
pub fn values_equal(expected: &Value, actual: &Value) -> Result<bool, ComparisonError> {
    Resolver::new(DEFAULT_MAX_DEPTH).equal(expected, actual)
}

/// Walks two graphs for structural equality
///
/// A pair of containers that is already being compared further up the stack
/// is treated as equal, so cyclic graphs of the same shape terminate. Graphs
/// that grow without repeating a pair stop at `max_depth`.
struct Resolver {
    in_progress: Vec<(usize, usize)>,
    depth: usize,
    max_depth: usize,
}

impl Resolver {
    fn new(max_depth: usize) -> Self {
        Self {
            in_progress: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    fn equal(&mut self, expected: &Value, actual: &Value) -> Result<bool, ComparisonError> {
        if let Some(result) = try_value_equals(expected, actual) {
            return result;
        }
        if let Some(result) = try_ordering_compare(expected, actual) {
            return result.map(|o| o == Ordering::Equal);
        }
        self.structural(expected, actual)
    }

    fn structural(&mut self, expected: &Value, actual: &Value) -> Result<bool, ComparisonError> {
        match (expected, actual) {
            (Value::Null, Value::Null) => return Ok(true),
            (Value::Null, _) | (_, Value::Null) => return Ok(false),
            (Value::Lazy(a), _) => return self.equal(&a.force(), actual),
            (_, Value::Lazy(b)) => return self.equal(expected, &b.force()),
            _ => {}
        }

        let pair = match (expected.identity(), actual.identity()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };
        if let Some(pair) = pair {
            if pair.0 == pair.1 || self.in_progress.contains(&pair) {
                return Ok(true);
            }
        }
        if self.depth >= self.max_depth {
            return Err(ComparisonError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        if let Some(pair) = pair {
            self.in_progress.push(pair);
        }
        self.depth += 1;
        let result = self.containers(expected, actual);
        self.depth -= 1;
        if pair.is_some() {
            self.in_progress.pop();
        }
        result
    }

    fn containers(&mut self, expected: &Value, actual: &Value) -> Result<bool, ComparisonError> {
        match (expected, actual) {
            (Value::Seq(a), Value::Seq(b)) => self.ordered(a.items(), b.items()),
            (Value::Set(a), Value::Set(b)) => self.unordered(a, b),
            (Value::Map(a), Value::Map(b)) => {
                if a.entries().len() != b.entries().len() {
                    return Ok(false);
                }
                for (key, value) in a.entries() {
                    let mut found = false;
                    for (other_key, other_value) in b.entries() {
                        if self.equal(key, other_key)? && self.equal(value, other_value)? {
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Value::Grouping(a), Value::Grouping(b)) => {
                Ok(self.equal(&a.key, &b.key)? && self.ordered(a.items.items(), b.items.items())?)
            }
            (Value::Record(a), Value::Record(b)) => self.records(a.as_ref(), b.as_ref()),
            _ => Ok(false),
        }
    }

    fn ordered(&mut self, expected: &[Value], actual: &[Value]) -> Result<bool, ComparisonError> {
        if expected.len() != actual.len() {
            return Ok(false);
        }
        for (a, b) in expected.iter().zip(actual) {
            if !self.equal(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn unordered(&mut self, expected: &Collection, actual: &Collection) -> Result<bool, ComparisonError> {
        if expected.items().len() != actual.items().len() {
            return Ok(false);
        }
        for item in expected.items() {
            let mut found = false;
            for candidate in actual.items() {
                if self.equal(item, candidate)? {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn records(
        &mut self,
        expected: &dyn Structural,
        actual: &dyn Structural,
    ) -> Result<bool, ComparisonError> {
        if expected.type_name() != actual.type_name() {
            return Ok(false);
        }
        let filter = PublicInstanceMembers;
        let a: Vec<_> = expected.members().into_iter().filter(|m| filter.include(m)).collect();
        let b: Vec<_> = actual.members().into_iter().filter(|m| filter.include(m)).collect();
        if a.len() != b.len() {
            return Ok(false);
        }
        for (ma, mb) in a.iter().zip(&b) {
            if ma.name() != mb.name() {
                return Ok(false);
            }
            let va = ma.value().map_err(Clone::clone)?;
            let vb = mb.value().map_err(Clone::clone)?;
            if !self.equal(va, vb)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
