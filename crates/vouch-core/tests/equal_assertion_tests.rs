#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::any::Any;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use vouch_core::assertions::{equal, equal_with};
use vouch_core::errors::{ComparisonError, FailureKind};
use vouch_core::value::{Member, Structural, Value};
use vouch_core::{assert_equal, record};

/// Text compared without regard to ASCII case
struct CaseInsensitive(String);

impl Structural for CaseInsensitive {
    fn type_name(&self) -> String {
        "CaseInsensitive".to_string()
    }

    fn members(&self) -> Vec<Member> {
        vec![Member::new("Text", self.0.clone())]
    }

    fn value_equals(&self, other: &dyn Structural) -> Option<Result<bool, ComparisonError>> {
        let other = other.as_any()?.downcast_ref::<CaseInsensitive>()?;
        Some(Ok(self.0.eq_ignore_ascii_case(&other.0)))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Ordered by `major` only; `label` is informational
struct Release {
    major: u32,
    label: &'static str,
}

impl Structural for Release {
    fn type_name(&self) -> String {
        "Release".to_string()
    }

    fn members(&self) -> Vec<Member> {
        vec![Member::new("Major", self.major), Member::new("Label", self.label)]
    }

    fn ordering(&self, other: &dyn Structural) -> Option<Result<Ordering, ComparisonError>> {
        let other = other.as_any()?.downcast_ref::<Release>()?;
        Some(Ok(self.major.cmp(&other.major)))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Every `Parent` is a brand new node, so the graph never repeats itself
struct Infinite;

impl Structural for Infinite {
    fn type_name(&self) -> String {
        "Infinite".to_string()
    }

    fn members(&self) -> Vec<Member> {
        vec![Member::from_value("Parent", Value::Record(Rc::new(Infinite)))]
    }
}

// --- Scalars ---

#[test]
fn test_equal_scalars_pass() {
    equal(&42, &42).unwrap();
    equal(&'a', &'a').unwrap();
    equal(&true, &true).unwrap();
    equal(&f64::NAN, &f64::NAN).unwrap();
    equal(&uuid::Uuid::nil(), &uuid::Uuid::nil()).unwrap();
}

#[test]
fn test_exact_equality_respects_numeric_width() {
    let failure = equal(&42, &42i64).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::ValuesDiffer);
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Values differ\nExpected: 42\nActual:   42"
    );
}

#[test]
fn test_chars_render_quoted() {
    let failure = equal(&'a', &'b').unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Values differ\nExpected: 'a'\nActual:   'b'"
    );
}

// --- Records and capabilities ---

#[test]
fn test_records_compare_structurally() {
    equal(&record!(Point { X: 1, Y: 2 }), &record!(Point { X: 1, Y: 2 })).unwrap();

    let failure = equal(&record!(Point { X: 1, Y: 2 }), &record!(Point { X: 1, Y: 3 })).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Values differ\n\
         Expected: Point { X = 1, Y = 2 }\n\
         Actual:   Point { X = 1, Y = 3 }"
    );
}

#[test]
fn test_records_of_different_types_are_not_equal() {
    let failure = equal(&record!(Point { X: 1 }), &record!(Vector { X: 1 })).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::ValuesDiffer);
}

#[test]
fn test_value_equality_takes_priority_over_members() {
    let expected = Rc::new(CaseInsensitive("Hello".to_string()));
    let actual = Rc::new(CaseInsensitive("HELLO".to_string()));

    equal(&expected, &actual).unwrap();
}

#[test]
fn test_ordering_is_used_when_no_value_equality() {
    let expected = Rc::new(Release {
        major: 2,
        label: "beta",
    });
    let actual = Rc::new(Release {
        major: 2,
        label: "final",
    });
    equal(&expected, &actual).unwrap();

    let newer = Rc::new(Release {
        major: 3,
        label: "beta",
    });
    assert!(equal(&expected, &newer).is_err());
}

#[test]
fn test_unbounded_graph_stops_at_depth_limit() {
    let expected = Value::Record(Rc::new(Infinite));
    let actual = Value::Record(Rc::new(Infinite));

    let failure = equal(&expected, &actual).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::DepthExceeded);
    assert_eq!(failure.code(), "ERR_DEPTH_EXCEEDED");
    assert!(failure.message().starts_with(
        "assert_equal() Failure: Exceeded the maximum depth 50; \
         check for infinite recursion or circular references\nExpected: Infinite {"
    ));
}

#[test]
fn test_unbounded_graph_inside_sequence_stops_at_depth_limit() {
    let expected = vec![Value::Record(Rc::new(Infinite))];
    let actual = vec![Value::Record(Rc::new(Infinite))];

    let failure = equal(&expected, &actual).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::DepthExceeded);
    assert!(matches!(
        failure.cause(),
        Some(ComparisonError::DepthExceeded { max_depth: 50 })
    ));
    assert!(failure.message().contains("↓ (pos 0)"));
}

// --- Unordered collections ---

#[test]
fn test_sets_ignore_order_and_container_type() {
    equal(&BTreeSet::from([1, 2, 3]), &HashSet::from([3, 1, 2])).unwrap();
}

#[test]
fn test_maps_ignore_container_type() {
    equal(
        &BTreeMap::from([("a", 1), ("b", 2)]),
        &HashMap::from([("b", 2), ("a", 1)]),
    )
    .unwrap();
}

#[test]
fn test_map_mismatch_is_collections_differ() {
    let failure = equal(&BTreeMap::from([("a", 1)]), &BTreeMap::from([("a", 2)])).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::CollectionsDiffer);
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Collections differ\n\
         Expected: [[\"a\"] = 1]\n\
         Actual:   [[\"a\"] = 2]"
    );
}

#[test]
fn test_sequence_of_records_points_at_element() {
    let failure = equal(&vec![record!({ x: 1 })], &vec![record!({ x: 2 })]).unwrap_err();

    assert_eq!(
        failure.message(),
        format!(
            "assert_equal() Failure: Collections differ\n\
             {pad}↓ (pos 0)\n\
             Expected: [{{ x = 1 }}]\n\
             Actual:   [{{ x = 2 }}]\n\
             {pad}↑ (pos 0)",
            pad = " ".repeat(11)
        )
    );
}

// --- Custom comparers ---

#[test]
fn test_equal_with_comparer() {
    let expected = "hello".to_string();

    equal_with(&expected, &"HELLO".to_string(), |a, b| Ok(a.eq_ignore_ascii_case(b))).unwrap();

    let failure =
        equal_with(&expected, &"world".to_string(), |a, b| Ok(a.eq_ignore_ascii_case(b))).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::ValuesDiffer);
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Values differ\nExpected: \"hello\"\nActual:   \"world\""
    );
}

#[test]
fn test_equal_with_failing_comparer() {
    let failure = equal_with(&42, &2112, |_, _| Err(ComparisonError::comparer("overflow")))
        .unwrap_err();

    assert_eq!(failure.kind(), FailureKind::ComparerThrew);
    assert_eq!(
        failure.message(),
        "assert_equal() Failure: Exception thrown during comparison\nExpected: 42\nActual:   2112"
    );
    assert_eq!(
        failure.cause().map(ToString::to_string).as_deref(),
        Some("comparer failed: overflow")
    );
}

// --- Macro ---

#[test]
fn test_assert_equal_macro_passes() {
    assert_equal!(vec![1, 2, 3], vec![1, 2, 3]);
    assert_equal!("hello", "hello");
}

#[test]
#[should_panic(expected = "Values differ")]
fn test_assert_equal_macro_panics_with_message() {
    assert_equal!(42, 2112);
}
