//! Failure Gallery
//!
//! Prints the message of every kind of assertion failure:
//! - Windowed collection diffs with pointers
//! - String diffs
//! - Member-level equivalence mismatches
//! - Strict-mode leftovers
//! - Circular references
//!
//! Run with `RUST_LOG=vouch=debug` to see the engine's mismatch records.

use std::rc::Rc;

use vouch_core::logging_facility::{init, Profile};
use vouch_core::value::{Record, Value};
use vouch_core::{assertions, record, AssertionFailure};

fn show(title: &str, result: vouch_core::Result<()>) {
    println!("── {} ──", title);
    match result {
        Ok(()) => println!("(passed)"),
        Err(failure) => print_failure(&failure),
    }
    println!();
}

fn print_failure(failure: &AssertionFailure) {
    println!("[{}]", failure.code());
    println!("{}", failure);
}

fn main() {
    init(Profile::Development);

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  vouch - Failure Gallery                                 ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // SECTION 1: Exact equality
    // ═══════════════════════════════════════════════════════════
    show(
        "collections differ",
        assertions::equal(&vec![1, 2, 3, 4, 5, 6, 7], &vec![1, 2, 3, 99, 5, 6, 7]),
    );
    show(
        "container types differ",
        assertions::equal(&[1, 2], &vec![1, 3]),
    );
    show(
        "strings differ",
        assertions::equal("Why hello there world", "Why hello there world!"),
    );
    show(
        "comparer failed",
        assertions::equal_by(&[1, 2, 3], &[1, 2, 3], |e, _| {
            if *e == 3 {
                panic!("cannot compare three");
            }
            true
        }),
    );

    // ═══════════════════════════════════════════════════════════
    // SECTION 2: Equivalence
    // ═══════════════════════════════════════════════════════════
    show(
        "member value",
        assertions::equivalent(
            &record!({ Shallow: record!({ Value1: 42, Value2: "Hello" }) }),
            &record!({ Shallow: record!({ Value1: 13, Value2: "Hello" }) }),
            false,
        ),
    );
    show(
        "member list (strict)",
        assertions::equivalent(&record!({ x: 42 }), &record!({ x: 42, y: 2112 }), true),
    );
    show(
        "extra values (strict)",
        assertions::equivalent(&vec![1, 9, 4], &vec![6, 9, 4, 1], true),
    );
    show(
        "collection value missing",
        assertions::equivalent(&vec![1, 9, 4], &vec![6, 9, 4], false),
    );

    // ═══════════════════════════════════════════════════════════
    // SECTION 3: Graph shape
    // ═══════════════════════════════════════════════════════════
    let looping = Rc::new(Record::new("Node").with("Other", Value::Null));
    looping.set("Other", Value::Record(looping.clone()));
    let chain = Record::new("Node")
        .with(
            "Other",
            Record::new("Node").with("Other", Value::Null).into_value(),
        )
        .into_value();
    show(
        "circular reference",
        assertions::equivalent(&Value::Record(looping), &chain, false),
    );
}
