//! Exact-equality differs.
//!
//! Locates the first point at which two ordered sequences (or two strings)
//! stop matching and builds a bounded, pointer-annotated display of both
//! sides around it.
//!
//! ## Entry point
//!
//! ```
//! use vouch_core::diff::{diff_sequences, SequenceView};
//!
//! let expected = [1, 2, 3, 4, 5, 6, 7];
//! let actual = [1, 2, 3, 99, 5, 6, 7];
//! let divergence = diff_sequences(
//!     SequenceView::new("[i32; 7]", &expected),
//!     SequenceView::new("[i32; 7]", &actual),
//!     |a, b| Ok(a == b),
//! )
//! .unwrap();
//! assert_eq!(divergence.actual.line, "[···, 2, 3, 99, 5, 6, ···]");
//! ```
//!
//! ## Guarantees
//!
//! - **First divergence only**: the walk stops at the first differing index.
//! - **Bounded output**: at most [`WINDOW_SIZE`](crate::config::WINDOW_SIZE)
//!   elements per side; an ellipsis marks exactly the omitted elements.
//! - **Visible pointer**: the pointed-at element is always inside the window.
//! - **Contained comparer failures**: a failing or panicking comparer yields
//!   a `ComparerThrew` divergence, never an unwind through the caller.

pub mod model;
pub mod sequence;
pub mod text;

pub use model::{Divergence, DivergenceKind, Pointer, SideDisplay};
pub use sequence::{diff_sequences, SequenceView};
pub use text::diff_strings;
