//! vouch - structural comparison and diff reporting for test assertions
//!
//! This crate provides the comparison engines behind `assert_equal` and
//! `assert_equivalent`, including:
//! - A value model ([`value::Value`]) with conversion from std, `chrono`, `uuid`
//!   and `serde_json` types through [`value::Inspect`]
//! - A sequence differ that finds the first divergence and renders a windowed,
//!   pointer-annotated display of both sides
//! - A string differ with escape-aware pointer columns
//! - A deep equivalence engine with strict and non-strict modes, exclusion
//!   paths, cycle detection and a depth limit
//! - A bounded renderer for every value shown in a failure message
//!
//! Failures are returned as [`AssertionFailure`] values; the
//! [`assert_equal!`] and [`assert_equivalent!`] macros panic with the message.

pub mod assertions;
pub mod capability;
pub mod classify;
pub mod config;
pub mod diff;
pub mod equivalence;
pub mod errors;
pub mod logging_facility;
pub mod render;
pub mod value;

// Logging macros refer to schema constants through this path
pub use vouch_core_types;

// Re-export commonly used types
pub use assertions::{
    equal, equal_by, equal_with, equivalent, equivalent_with, equivalent_with_exclusions,
    try_equal_by,
};
pub use equivalence::{EquivalenceOptions, Mismatch, MismatchDetail, MismatchKind, Path};
pub use errors::{AssertionFailure, ComparisonError, FailureKind, Result};
pub use value::{Inspect, Member, Record, Structural, Value};
