//! Structured logging facility for vouch
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions on emitted events
//!
//! Every public assertion logs a start event and either an end or an
//! end_error event carrying the failure kind and code. Engines add
//! `debug!` records for the mismatch they report and `trace!` records for
//! each recursion step.
//!
//! # Usage
//!
//! ```rust
//! use vouch_core::logging_facility::{init, Profile};
//!
//! // Initialize once at test-harness startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, failure, duration_ms = ...)` - Log operation failure

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
