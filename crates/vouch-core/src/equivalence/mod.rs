//! Deep structural equivalence.
//!
//! Walks two [`Value`](crate::value::Value) graphs in parallel and reports the
//! first place where they stop being equivalent. Collections match without
//! regard to order, scalars match across numeric widths, and expected text
//! matches an actual date or URI it parses into.
//!
//! ## Entry point
//!
//! ```
//! use vouch_core::equivalence::{equivalent, EquivalenceOptions, MismatchKind};
//! use vouch_core::record;
//!
//! let expected = record!({ x: 42 });
//! let actual = record!({ x: 42, y: 2112 });
//!
//! assert!(equivalent(&expected, &actual, &EquivalenceOptions::new()).is_ok());
//!
//! let strict = EquivalenceOptions::new().with_strict(true);
//! let mismatch = equivalent(&expected, &actual, &strict).unwrap_err();
//! assert_eq!(mismatch.kind(), MismatchKind::MemberListDiffers);
//! ```
//!
//! ## Guarantees
//!
//! - **First mismatch only**: traversal stops at the first failure.
//! - **Bounded recursion**: nothing recurses past `max_depth`.
//! - **Cycle safety**: a graph that loops back on one side only is reported
//!   as a circular reference; both sides looping back together is equal.
//! - **No unwinding**: parse, getter and comparer failures become
//!   `ComparisonThrew` mismatches carrying the cause.

pub mod engine;
pub mod model;
pub mod options;
pub mod path;

pub use engine::equivalent;
pub use model::{Mismatch, MismatchDetail, MismatchKind};
pub use options::EquivalenceOptions;
pub use path::{ExclusionSet, Path};
