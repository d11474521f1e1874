//! Canonical schema constants for structured logging and events
//!
//! These constants keep field keys consistent between the logging macros,
//! the engines, and log assertions in tests.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_PATH: &str = "path";
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_STRICT: &str = "strict";
pub const FIELD_KIND: &str = "kind";

// Collection sizes
pub const FIELD_EXPECTED_LEN: &str = "expected_len";
pub const FIELD_ACTUAL_LEN: &str = "actual_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_ASSERT_EQUAL: &str = "assert_equal";
pub const OP_ASSERT_EQUIVALENT: &str = "assert_equivalent";
