//! Values with a canonical text form that get special-case comparison.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use std::cmp::Ordering;

use crate::errors::ComparisonError;

/// A URI compared by its original string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    pub fn new(original: impl Into<String>) -> Self {
        Uri(original.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Discriminant of a [`Special`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    DateTime,
    DateTimeOffset,
    Uri,
}

impl SpecialKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            SpecialKind::DateTime => "NaiveDateTime",
            SpecialKind::DateTimeOffset => "DateTime<FixedOffset>",
            SpecialKind::Uri => "Uri",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Special {
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Uri(Uri),
}

impl Special {
    pub fn kind(&self) -> SpecialKind {
        match self {
            Special::DateTime(_) => SpecialKind::DateTime,
            Special::DateTimeOffset(_) => SpecialKind::DateTimeOffset,
            Special::Uri(_) => SpecialKind::Uri,
        }
    }

    /// Round-trip text form: `2022-12-01T01:03:01.0000000[+00:00]`
    pub fn canonical(&self) -> String {
        match self {
            Special::DateTime(dt) => format!(
                "{}.{:07}",
                dt.format("%Y-%m-%dT%H:%M:%S"),
                dt.nanosecond() % 1_000_000_000 / 100
            ),
            Special::DateTimeOffset(dt) => format!(
                "{}.{:07}{}",
                dt.format("%Y-%m-%dT%H:%M:%S"),
                dt.nanosecond() % 1_000_000_000 / 100,
                dt.format("%:z")
            ),
            Special::Uri(uri) => uri.as_str().to_string(),
        }
    }

    /// Parse `text` into a value of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::Parse`] when the text is not a valid
    /// representation of `kind`.
    pub fn parse_as(kind: SpecialKind, text: &str) -> Result<Special, ComparisonError> {
        let parse_err = |reason: String| ComparisonError::Parse {
            input: text.to_string(),
            target: kind.type_name().to_string(),
            reason,
        };
        match kind {
            SpecialKind::DateTime => text
                .parse::<NaiveDateTime>()
                .map(Special::DateTime)
                .map_err(|e| parse_err(e.to_string())),
            SpecialKind::DateTimeOffset => DateTime::parse_from_rfc3339(text)
                .map(Special::DateTimeOffset)
                .map_err(|e| parse_err(e.to_string())),
            SpecialKind::Uri => Ok(Special::Uri(Uri::new(text))),
        }
    }

    /// Compare two special values
    ///
    /// Returns `None` when the kinds have no meaningful ordering (URIs).
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::Incomparable`] for values of different kinds.
    pub fn compare(&self, other: &Special) -> Result<Option<Ordering>, ComparisonError> {
        match (self, other) {
            (Special::DateTime(a), Special::DateTime(b)) => Ok(Some(a.cmp(b))),
            (Special::DateTimeOffset(a), Special::DateTimeOffset(b)) => Ok(Some(a.cmp(b))),
            (Special::Uri(_), Special::Uri(_)) => Ok(None),
            _ => Err(ComparisonError::Incomparable {
                expected_type: self.kind().type_name().to_string(),
                actual_type: other.kind().type_name().to_string(),
            }),
        }
    }

    /// Value equality within a kind
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::Incomparable`] for values of different kinds.
    pub fn equals(&self, other: &Special) -> Result<bool, ComparisonError> {
        match (self, other) {
            (Special::Uri(a), Special::Uri(b)) => Ok(a == b),
            _ => self.compare(other).map(|o| o == Some(Ordering::Equal)),
        }
    }
}
