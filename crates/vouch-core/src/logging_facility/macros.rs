//! Canonical logging macros
//!
//! These macros give every assertion boundary the same structured shape:
//! `component`, `op` and `event` fields, plus `duration_ms` at the end.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use vouch_core::log_op_start;
/// log_op_start!("assert_equivalent");
/// log_op_start!("assert_equivalent", strict = true);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use vouch_core::log_op_end;
/// log_op_end!("assert_equal", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a failed operation
///
/// The failure expression must be an [`AssertionFailure`](crate::errors::AssertionFailure)
/// (or a reference to one); its kind and stable code are attached.
///
/// # Example
///
/// ```
/// # use vouch_core::log_op_error;
/// use vouch_core::errors::{AssertionFailure, FailureKind};
/// let failure = AssertionFailure::new(FailureKind::ValuesDiffer, "assert_equal");
/// log_op_error!("assert_equal", failure, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $failure:expr, duration_ms = $duration:expr) => {{
        let failure: &$crate::errors::AssertionFailure = &$failure;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
        );
    }};
    ($op:expr, $failure:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let failure: &$crate::errors::AssertionFailure = &$failure;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::vouch_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
            $($field)*
        );
    }};
}
