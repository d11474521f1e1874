#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use vouch_core::assertions::{equivalent, equivalent_with, equivalent_with_exclusions};
use vouch_core::equivalence::{EquivalenceOptions, MismatchKind};
use vouch_core::errors::{ComparisonError, FailureKind};
use vouch_core::value::{Decimal, Inspect, Member, Record, Structural, Uri, Value};
use vouch_core::{assert_equivalent, record};

fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap()
}

/// A node whose `Other` member points back at itself
fn self_loop() -> Value {
    let node = Rc::new(Record::new("Node").with("Other", Value::Null));
    node.set("Other", Value::Record(node.clone()));
    Value::Record(node)
}

/// Two nodes, the second ending in null
fn chain() -> Value {
    Record::new("Node")
        .with(
            "Other",
            Record::new("Node").with("Other", Value::Null).into_value(),
        )
        .into_value()
}

/// Every read of `Parent` produces a fresh instance
struct Infinite;

impl Structural for Infinite {
    fn type_name(&self) -> String {
        "Infinite".to_string()
    }

    fn members(&self) -> Vec<Member> {
        vec![Member::from_value("Parent", Value::Record(Rc::new(Infinite)))]
    }
}

// --- Scalars and strings ---

#[test]
fn test_numbers_are_equivalent_across_representations() {
    equivalent(&42, &42i64, true).unwrap();
    equivalent(&42u8, &42.0f64, true).unwrap();
    equivalent(&42, &Decimal::new(4200, 2), true).unwrap();
}

#[test]
fn test_root_scalar_mismatch() {
    let failure = equivalent(&42, &2112, false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::MemberValueDiffers);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\nExpected: 42\nActual:   2112"
    );
}

#[test]
fn test_null_against_value() {
    let failure = equivalent(&None::<i32>, &42, false).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\nExpected: null\nActual:   42"
    );

    equivalent(&None::<i32>, &None::<String>, true).unwrap();
}

#[test]
fn test_strings_are_case_sensitive() {
    let failure = equivalent("Hello", "hello", false).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\nExpected: \"Hello\"\nActual:   \"hello\""
    );
}

#[test]
fn test_enum_variants() {
    let red = Value::enumeration("Color", "Red", 0);
    equivalent(&red, &Value::enumeration("Color", "Red", 0), true).unwrap();

    let failure = equivalent(&red, &Value::enumeration("Color", "Blue", 2), true).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\nExpected: Red\nActual:   Blue"
    );
}

// --- Records ---

#[test]
fn test_nested_member_mismatch_names_the_path() {
    let expected = record!({ x: record!({ y: 2112 }) });
    let actual = record!({ x: record!({ y: 2600 }) });

    let failure = equivalent(&expected, &actual, false).unwrap_err();

    assert_eq!(failure.mismatch().unwrap().path.to_string(), "x.y");
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched value on member 'x.y'\n\
         Expected: 2112\n\
         Actual:   2600"
    );
}

#[test]
fn test_typed_record_against_anonymous_record() {
    let expected = record!(Shallow { Value1: 42, Value2: "Hello" });
    let actual = record!({ Value1: 42, Value2: "Hello", Value3: 21.12 });

    equivalent(&expected, &actual, false).unwrap();
}

#[test]
fn test_extra_actual_member_is_allowed_when_not_strict() {
    let expected = record!({ x: 42 });
    let actual = record!({ x: 42, y: 2112 });

    equivalent(&expected, &actual, false).unwrap();

    let failure = equivalent(&expected, &actual, true).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::MemberListDiffers);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched member list\n\
         Expected: [\"x\"]\n\
         Actual:   [\"x\", \"y\"]"
    );
}

#[test]
fn test_missing_actual_member_always_fails() {
    let failure = equivalent(&record!({ x: 42, y: 2112 }), &record!({ y: 2112 }), false).unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched member list\n\
         Expected: [\"x\", \"y\"]\n\
         Actual:   [\"y\"]"
    );
}

#[test]
fn test_nested_member_list_is_qualified() {
    let expected = record!({ Shallow: record!({ x: 1, y: 2 }) });
    let actual = record!({ Shallow: record!({ x: 1 }) });

    let failure = equivalent(&expected, &actual, false).unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched member list\n\
         Expected: [\"Shallow.x\", \"Shallow.y\"]\n\
         Actual:   [\"Shallow.x\"]"
    );
}

#[test]
fn test_hidden_members_are_ignored() {
    let expected = Record::new("Widget")
        .with("Name", "knob")
        .with_member(Member::new("Legacy", 1).deprecated())
        .into_value();
    let actual = Record::new("Widget")
        .with("Name", "knob")
        .with_member(Member::new("Legacy", 2).deprecated())
        .with_member(Member::new("Count", 9).static_member())
        .into_value();

    equivalent(&expected, &actual, true).unwrap();
}

#[test]
fn test_nominal_types_must_match() {
    let expected = Record::new("FileInfo")
        .nominal()
        .with("FullName", "/tmp/vouch")
        .into_value();
    let actual = Record::new("DirectoryInfo")
        .nominal()
        .with("FullName", "/tmp/vouch")
        .into_value();

    let failure = equivalent(&expected, &actual, false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::TypesDiffer);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Types did not match\n\
         Expected type: FileInfo\n\
         Actual type:   DirectoryInfo"
    );
}

#[test]
fn test_tuples_compare_by_position() {
    equivalent(&(1, "a"), &(1i64, "a"), true).unwrap();

    let failure = equivalent(&(1, "a"), &(1, "b"), true).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched value on member '1'\n\
         Expected: \"a\"\n\
         Actual:   \"b\""
    );
}

#[test]
fn test_entries_compare_key_and_value() {
    equivalent(&Value::entry("a", 42), &Value::entry("a", 42i64), true).unwrap();

    let failure = equivalent(&Value::entry("a", 42), &Value::entry("a", 2112), true).unwrap_err();
    assert_eq!(failure.mismatch().unwrap().path.to_string(), "Value");
}

// --- Collections ---

#[test]
fn test_collections_ignore_order() {
    equivalent(&vec![1, 9, 4], &vec![4, 1, 9], true).unwrap();
    equivalent(&BTreeSet::from([1, 2, 3]), &vec![3, 2, 1], true).unwrap();
}

#[test]
fn test_extra_values_found_when_strict() {
    let expected = vec![1, 9, 4];
    let actual = vec![6, 9, 4, 1];

    equivalent(&expected, &actual, false).unwrap();

    let failure = equivalent(&expected, &actual, true).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::ExtraValuesFound);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Extra values found\n\
         Expected: [1, 9, 4]\n\
         Actual:   [6] left over from [6, 9, 4, 1]"
    );
}

#[test]
fn test_collection_value_not_found() {
    let failure = equivalent(&vec![1, 9, 4], &vec![6, 9, 4], false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::CollectionValueMissing);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Collection value not found\n\
         Expected: 1\n\
         In:       [6, 9, 4]"
    );
}

#[test]
fn test_collection_value_not_found_in_member() {
    let expected = record!({ x: vec![1, 9, 4] });
    let actual = record!({ x: vec![6, 9, 4] });

    let failure = equivalent(&expected, &actual, false).unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Collection value not found in member 'x'\n\
         Expected: 1\n\
         In:       [6, 9, 4]"
    );
}

#[test]
fn test_collection_of_records_matches_by_equivalence() {
    let expected = vec![record!({ Foo: "Bar" }), record!({ Foo: "Baz" })];
    let actual = vec![
        record!({ Foo: "Baz", Extra: 1 }),
        record!({ Foo: "Bar", Extra: 2 }),
    ];

    equivalent(&expected, &actual, false).unwrap();
}

#[test]
fn test_collection_against_record_is_types_differ() {
    let failure = equivalent(&vec![1, 2], &record!({ x: 1 }), false).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::TypesDiffer);
}

#[test]
fn test_dictionaries_compare_entries() {
    let expected = BTreeMap::from([("a", 1), ("b", 2)]);
    let actual: HashMap<&str, i64> = HashMap::from([("b", 2), ("a", 1), ("c", 3)]);

    equivalent(&expected, &actual, false).unwrap();

    let failure = equivalent(&expected, &BTreeMap::from([("a", 1), ("b", 2), ("c", 3)]), true)
        .unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Extra values found\n\
         Expected: [[\"a\"] = 1, [\"b\"] = 2]\n\
         Actual:   [[\"c\"] = 3] left over from [[\"a\"] = 1, [\"b\"] = 2, [\"c\"] = 3]"
    );
}

#[test]
fn test_dictionary_entry_not_found() {
    let failure =
        equivalent(&BTreeMap::from([("a", 1)]), &BTreeMap::from([("a", 2)]), false).unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Collection value not found\n\
         Expected: [\"a\"] = 1\n\
         In:       [[\"a\"] = 2]"
    );
}

#[test]
fn test_grouping_values_differ() {
    let expected = vec![Value::grouping(false, vec![1.inspect(), 3.inspect()])];
    let actual = vec![
        Value::grouping(true, vec![1.inspect()]),
        Value::grouping(false, vec![2.inspect(), 4.inspect()]),
    ];

    let failure = equivalent(&expected, &actual, false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::GroupingValuesDiffer);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Grouping key [false] has mismatched values\n\
         Expected: [1, 3]\n\
         Actual:   [2, 4]"
    );
}

#[test]
fn test_groupings_match_by_key() {
    let expected = vec![
        Value::grouping("odd", vec![1.inspect(), 3.inspect()]),
        Value::grouping("even", vec![2.inspect()]),
    ];
    let actual = vec![
        Value::grouping("even", vec![2.inspect()]),
        Value::grouping("odd", vec![3.inspect(), 1.inspect()]),
    ];

    equivalent(&expected, &actual, true).unwrap();
}

#[test]
fn test_flattened_grid_matches_linear_sequence() {
    let grid = Value::flattened("i32[,]", [[1, 2], [3, 4]]);

    equivalent(&vec![4, 3, 2, 1], &grid, true).unwrap();
    equivalent(&grid, &vec![1, 2, 3, 4], true).unwrap();
}

// --- Special values ---

#[test]
fn test_datetime_against_its_text() {
    let moment = datetime(2022, 12, 1, 1, 3, 1);

    equivalent("2022-12-01T01:03:01", &moment, false).unwrap();
    equivalent(&moment, &datetime(2022, 12, 1, 1, 3, 1), true).unwrap();
}

#[test]
fn test_datetime_mismatch_uses_round_trip_format() {
    let failure = equivalent(
        &datetime(2022, 12, 1, 1, 3, 1),
        &datetime(2011, 9, 13, 18, 22, 0),
        false,
    )
    .unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\n\
         Expected: 2022-12-01T01:03:01.0000000\n\
         Actual:   2011-09-13T18:22:00.0000000"
    );
}

#[test]
fn test_datetime_against_text_actual_is_comparison_threw() {
    let failure = equivalent(&datetime(2022, 12, 1, 1, 3, 1), "2022-12-01T01:03:01", false)
        .unwrap_err();

    assert_eq!(failure.kind(), FailureKind::ComparisonThrew);
    assert!(matches!(
        failure.cause(),
        Some(ComparisonError::Incomparable { .. })
    ));
}

#[test]
fn test_uri_compares_by_original_text() {
    let uri = Uri::new("https://example.com/docs");

    equivalent(&uri, &Uri::new("https://example.com/docs"), true).unwrap();
    equivalent("https://example.com/docs", &uri, true).unwrap();
    assert!(equivalent(&uri, &Uri::new("https://example.com/DOCS"), true).is_err());
}

// --- JSON and lazy values ---

#[test]
fn test_json_objects_behave_like_records() {
    let expected = json!({ "x": 42, "tags": ["a", "b"] });

    equivalent(&expected, &json!({ "tags": ["b", "a"], "x": 42, "y": true }), false).unwrap();
    equivalent(&json!({ "x": 42 }), &record!({ x: 42 }), true).unwrap();

    let failure = equivalent(&expected, &json!({ "x": 43, "tags": ["a", "b"] }), false).unwrap_err();
    assert_eq!(failure.mismatch().unwrap().path.to_string(), "x");
}

#[test]
fn test_lazy_values_are_forced() {
    let lazy = Value::lazy("Lazy<i32>", || 42.inspect());
    equivalent(&lazy, &42, true).unwrap();

    let lazy = Value::lazy("Lazy<i32>", || 42.inspect());
    let failure = equivalent(&2112, &lazy, true).unwrap_err();
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure\nExpected: 2112\nActual:   42"
    );
}

// --- Cycles and depth ---

#[test]
fn test_circular_expected() {
    let failure = equivalent(&self_loop(), &chain(), false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::CircularReference);
    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Circular reference found in 'expected.Other'"
    );
}

#[test]
fn test_circular_actual() {
    let failure = equivalent(&chain(), &self_loop(), false).unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Circular reference found in 'actual.Other'"
    );
}

#[test]
fn test_matching_cycles_are_equivalent() {
    equivalent(&self_loop(), &self_loop(), true).unwrap();
}

#[test]
fn test_depth_limit() {
    let value = Value::Record(Rc::new(Infinite));
    let other = Value::Record(Rc::new(Infinite));

    let failure = equivalent(&value, &other, false).unwrap_err();

    assert_eq!(failure.kind(), FailureKind::DepthExceeded);
    let path = vec!["Parent"; 50].join(".");
    assert_eq!(
        failure.message(),
        format!(
            "assert_equivalent() Failure: Exceeded the maximum depth 50 with '{}'; \
             check for infinite recursion or circular references",
            path
        )
    );
}

#[test]
fn test_custom_depth_limit() {
    let options = EquivalenceOptions::new().with_max_depth(3);
    let failure = equivalent_with(
        &Value::Record(Rc::new(Infinite)),
        &Value::Record(Rc::new(Infinite)),
        &options,
    )
    .unwrap_err();

    let mismatch = failure.mismatch().unwrap();
    assert_eq!(mismatch.kind(), MismatchKind::DepthExceeded);
    assert_eq!(mismatch.path.to_string(), "Parent.Parent.Parent");
}

// --- Exclusions ---

#[test]
fn test_excluded_member_is_skipped() {
    let expected = record!({ Shallow: record!({ Value1: 42, Value2: "Hello" }) });
    let actual = record!({ Shallow: record!({ Value1: 2112, Value2: "Hello" }) });

    equivalent_with_exclusions(&expected, &actual, ["Shallow.Value1"]).unwrap();

    let failure = equivalent_with_exclusions(&expected, &actual, ["Value1"]).unwrap_err();
    assert_eq!(failure.mismatch().unwrap().path.to_string(), "Shallow.Value1");
}

#[test]
fn test_excluded_member_leaves_member_list() {
    let options = EquivalenceOptions::new()
        .with_strict(true)
        .with_exclusion("y");

    equivalent_with(&record!({ x: 1 }), &record!({ x: 1, y: 2 }), &options).unwrap();
}

fn deep(value3: i128, shallow_value1: i32, other_value1: i32) -> Value {
    record!(DeepClass {
        Value3: Decimal::new(value3, 2),
        Shallow: record!(ShallowClass { Value1: shallow_value1, Value2: "Hello" }),
        Other: record!(ShallowClass { Value1: other_value1, Value2: "world" }),
    })
}

#[test]
fn test_exclusions_at_mixed_depths_still_compare_the_rest() {
    let expected = deep(2112, 4, 10);
    let actual = deep(4224, 2, 15);

    let failure =
        equivalent_with_exclusions(&expected, &actual, ["Value3", "Shallow.Value2", "Other.Value1"])
            .unwrap_err();

    assert_eq!(
        failure.message(),
        "assert_equivalent() Failure: Mismatched value on member 'Shallow.Value1'\n\
         Expected: 4\n\
         Actual:   2"
    );
}

#[test]
fn test_exclusions_at_mixed_depths_pass_when_every_difference_is_excluded() {
    let expected = deep(2112, 4, 10);
    let actual = deep(4224, 2, 15);

    equivalent_with_exclusions(
        &expected,
        &actual,
        ["Value3", "Shallow.Value1", "Shallow.Value2", "Other.Value1"],
    )
    .unwrap();
}

// --- Macro ---

#[test]
fn test_assert_equivalent_macro_passes() {
    assert_equivalent!(record!({ x: 42 }), record!({ x: 42, y: 2112 }));
    assert_equivalent!(vec![1, 2, 3], vec![3, 2, 1], strict);
}

#[test]
#[should_panic(expected = "Mismatched value on member 'x'")]
fn test_assert_equivalent_macro_panics_with_message() {
    assert_equivalent!(record!({ x: 42 }), record!({ x: 2112 }));
}
