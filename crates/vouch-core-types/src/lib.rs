//! Core types shared across vouch facilities
//!
//! This crate provides foundational types used by the comparison engines,
//! the error facility and the logging facility:
//!
//! - **Schema constants**: canonical field keys, event names and op names
//! - **Side**: expected/actual marker used in structured reports

pub mod schema;
pub mod side;

pub use side::Side;
