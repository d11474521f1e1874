//! Panicking assertion macros

/// Assert exact equality, panicking with the failure message
///
/// ```
/// use vouch_core::assert_equal;
///
/// assert_equal!(vec![1, 2, 3], vec![1, 2, 3]);
/// assert_equal!("hello", "hello");
/// ```
///
/// ```should_panic
/// use vouch_core::assert_equal;
///
/// assert_equal!(42, 2112);
/// ```
#[macro_export]
macro_rules! assert_equal {
    ($expected:expr, $actual:expr $(,)?) => {
        if let Err(failure) = $crate::assertions::equal(&$expected, &$actual) {
            panic!("{}", failure);
        }
    };
}

/// Assert deep equivalence, panicking with the failure message
///
/// Non-strict by default; pass `strict` as a third argument.
///
/// ```
/// use vouch_core::{assert_equivalent, record};
///
/// assert_equivalent!(record!({ x: 42 }), record!({ x: 42, y: 2112 }));
/// assert_equivalent!(vec![1, 2], vec![2, 1], strict);
/// ```
#[macro_export]
macro_rules! assert_equivalent {
    ($expected:expr, $actual:expr $(,)?) => {
        if let Err(failure) = $crate::assertions::equivalent(&$expected, &$actual, false) {
            panic!("{}", failure);
        }
    };
    ($expected:expr, $actual:expr, strict $(,)?) => {
        if let Err(failure) = $crate::assertions::equivalent(&$expected, &$actual, true) {
            panic!("{}", failure);
        }
    };
}
