//! Value classifier.
//!
//! Assigns each value a [`Kind`] and its declared type name. Both engines
//! branch on the kind; the type name feeds `TypesDiffer` reports and the
//! type prefixes of sequence displays.

use crate::value::{Scalar, SpecialKind, Value};

/// Sub-kind of an intrinsic scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Numeric,
    Bool,
    Char,
    Enum,
    Decimal,
    Guid,
}

/// Comparison-relevant shape of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Scalar(ScalarKind),
    Str,
    Sequence,
    Set,
    Dictionary,
    Grouping,
    Lazy,
    StructuralRecord,
    SpecialCased(SpecialKind),
}

impl Kind {
    /// Sequences and sets; both are matched as multisets by the equivalence engine
    pub fn is_collection(&self) -> bool {
        matches!(self, Kind::Sequence | Kind::Set)
    }
}

/// Result of classifying one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: Kind,
    pub type_name: String,
}

pub fn classify(value: &Value) -> Classification {
    Classification {
        kind: kind_of(value),
        type_name: value.type_name(),
    }
}

pub fn kind_of(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Scalar(s) => Kind::Scalar(match s {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Char(_) => ScalarKind::Char,
            Scalar::Int { .. } | Scalar::F32(_) | Scalar::F64(_) => ScalarKind::Numeric,
            Scalar::Decimal(_) => ScalarKind::Decimal,
            Scalar::Enum(_) => ScalarKind::Enum,
            Scalar::Guid(_) => ScalarKind::Guid,
        }),
        Value::Str(_) => Kind::Str,
        Value::Seq(_) => Kind::Sequence,
        Value::Set(_) => Kind::Set,
        Value::Map(_) => Kind::Dictionary,
        Value::Grouping(_) => Kind::Grouping,
        Value::Lazy(_) => Kind::Lazy,
        Value::Record(_) => Kind::StructuralRecord,
        Value::Special(s) => Kind::SpecialCased(s.kind()),
    }
}
