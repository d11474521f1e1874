//! Structural records: values compared member by member.
//!
//! A type opts into structural comparison by implementing [`Structural`].
//! For ad-hoc shapes (anonymous records, cyclic test graphs) use [`Record`]
//! or the [`record!`](crate::record) macro.

use std::any::Any;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use super::inspect::Inspect;
use super::Value;
use crate::errors::ComparisonError;

/// Attributes that decide whether a member takes part in comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberAttrs {
    pub deprecated: bool,
    pub is_static: bool,
    pub indexer: bool,
}

/// A named member of a record and the result of reading it
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    value: Result<Value, ComparisonError>,
    attrs: MemberAttrs,
}

impl Member {
    pub fn new(name: impl Into<String>, value: impl Inspect) -> Self {
        Self::from_value(name, value.inspect())
    }

    pub fn from_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Ok(value),
            attrs: MemberAttrs::default(),
        }
    }

    /// A member whose getter fails
    pub fn failing(name: impl Into<String>, err: ComparisonError) -> Self {
        Self {
            name: name.into(),
            value: Err(err),
            attrs: MemberAttrs::default(),
        }
    }

    pub fn deprecated(mut self) -> Self {
        self.attrs.deprecated = true;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.attrs.is_static = true;
        self
    }

    pub fn indexer(mut self) -> Self {
        self.attrs.indexer = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Result<&Value, &ComparisonError> {
        self.value.as_ref()
    }

    pub fn attrs(&self) -> MemberAttrs {
        self.attrs
    }
}

/// Predicate deciding which members are enumerated for comparison
pub trait MemberFilter {
    fn include(&self, member: &Member) -> bool;
}

impl<F> MemberFilter for F
where
    F: Fn(&Member) -> bool,
{
    fn include(&self, member: &Member) -> bool {
        self(member)
    }
}

/// Default filter: public instance members only, deprecated ones skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicInstanceMembers;

impl MemberFilter for PublicInstanceMembers {
    fn include(&self, member: &Member) -> bool {
        let attrs = member.attrs();
        !(attrs.deprecated || attrs.is_static || attrs.indexer)
    }
}

/// A value that can be compared member by member
///
/// Only `type_name` and `members` are required. The remaining methods are
/// optional capabilities; their defaults report "not applicable".
pub trait Structural {
    /// Declared type name; empty for anonymous records
    fn type_name(&self) -> String;

    /// All members in declaration order, filtering happens in the engines
    fn members(&self) -> Vec<Member>;

    /// Nominal records of different types are never equivalent, whatever
    /// their members
    fn is_nominal(&self) -> bool {
        false
    }

    /// Type-specific value equality
    fn value_equals(&self, other: &dyn Structural) -> Option<Result<bool, ComparisonError>> {
        let _ = other;
        None
    }

    /// Type-specific ordering
    fn ordering(&self, other: &dyn Structural) -> Option<Result<Ordering, ComparisonError>> {
        let _ = other;
        None
    }

    /// Downcast hook for the capability methods above
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// A record assembled at runtime
///
/// Members live behind a `RefCell` so a record can be made to point at
/// itself after it has been shared:
///
/// ```
/// use std::rc::Rc;
/// use vouch_core::value::{Record, Value};
///
/// let node = Rc::new(Record::new("Node").with("Other", Value::Null));
/// node.set("Other", Value::Record(node.clone()));
/// ```
#[derive(Debug)]
pub struct Record {
    type_name: String,
    nominal: bool,
    members: RefCell<Vec<Member>>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nominal: false,
            members: RefCell::new(Vec::new()),
        }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn with(self, name: impl Into<String>, value: impl Inspect) -> Self {
        self.with_member(Member::new(name, value))
    }

    pub fn with_member(self, member: Member) -> Self {
        self.members.borrow_mut().push(member);
        self
    }

    /// Mark the record as nominally typed
    pub fn nominal(mut self) -> Self {
        self.nominal = true;
        self
    }

    /// Replace the value of `name`, appending it if absent
    pub fn set(&self, name: &str, value: Value) {
        let mut members = self.members.borrow_mut();
        match members.iter_mut().find(|m| m.name == name) {
            Some(member) => member.value = Ok(value),
            None => members.push(Member::from_value(name, value)),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Record(Rc::new(self))
    }
}

impl Structural for Record {
    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn members(&self) -> Vec<Member> {
        self.members.borrow().clone()
    }

    fn is_nominal(&self) -> bool {
        self.nominal
    }
}

/// Build a [`Record`] value
///
/// ```
/// use vouch_core::record;
///
/// let anonymous = record!({ x: 42, y: "hello" });
/// let typed = record!(Shallow { Value1: 42, Value2: "Hello" });
/// let nested = record!({ x: record!({ y: 2112 }) });
/// ```
#[macro_export]
macro_rules! record {
    ({ $($name:ident : $value:expr),* $(,)? }) => {
        $crate::value::Record::anonymous()
            $(.with(stringify!($name), $value))*
            .into_value()
    };
    ($ty:ident { $($name:ident : $value:expr),* $(,)? }) => {
        $crate::value::Record::new(stringify!($ty))
            $(.with(stringify!($name), $value))*
            .into_value()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_instance_filter() {
        let filter = PublicInstanceMembers;
        assert!(filter.include(&Member::new("a", 1)));
        assert!(!filter.include(&Member::new("a", 1).deprecated()));
        assert!(!filter.include(&Member::new("a", 1).static_member()));
        assert!(!filter.include(&Member::new("a", 1).indexer()));
    }

    #[test]
    fn test_closure_filter() {
        let only_a = |m: &Member| m.name() == "a";
        assert!(only_a.include(&Member::new("a", 1)));
        assert!(!only_a.include(&Member::new("b", 1)));
    }

    #[test]
    fn test_set_replaces_and_appends() {
        let record = Record::new("Node").with("x", 1);
        record.set("x", Value::from(2));
        record.set("y", Value::from(3));
        let members = record.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name(), "x");
        assert!(matches!(members[0].value(), Ok(v) if v.to_string() == "2"));
    }

    #[test]
    fn test_record_macro_keeps_declaration_order() {
        let value = record!(Point { y: 1, x: 2 });
        let Value::Record(rec) = value else {
            panic!("not a record")
        };
        assert_eq!(rec.type_name(), "Point");
        let names: Vec<_> = rec.members().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["y", "x"]);
    }
}
