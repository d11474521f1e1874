//! Runtime value model.
//!
//! Both engines compare [`Value`] graphs rather than Rust values directly.
//! Conversion happens through the [`Inspect`] trait, which is implemented for
//! std collections, primitives, `uuid`, `chrono` and `serde_json` types, and
//! for any `Rc<T: Structural>`.
//!
//! ## Identity
//!
//! Container variants hold their payload behind `Rc`. The allocation address
//! is the value's identity, which the equivalence engine uses for cycle
//! detection. Cloning a `Value` preserves identity.

pub mod decimal;
pub mod inspect;
pub mod lazy;
pub mod record;
pub mod scalar;
pub mod special;

use std::fmt;
use std::rc::Rc;

pub use decimal::Decimal;
pub use inspect::{short_type_name, Inspect};
pub use lazy::Lazy;
pub use record::{Member, MemberAttrs, MemberFilter, PublicInstanceMembers, Record, Structural};
pub use scalar::{EnumValue, IntWidth, Scalar};
pub use special::{Special, SpecialKind, Uri};

/// An ordered or unordered collection of values
#[derive(Debug, Clone)]
pub struct Collection {
    type_name: String,
    items: Rc<Vec<Value>>,
}

impl Collection {
    pub fn new(type_name: impl Into<String>, items: Vec<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            items: Rc::new(items),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.items) as *const () as usize
    }
}

/// Keyed collection preserving insertion order
#[derive(Debug, Clone)]
pub struct Dictionary {
    type_name: String,
    entries: Rc<Vec<(Value, Value)>>,
}

impl Dictionary {
    pub fn new(type_name: impl Into<String>, entries: Vec<(Value, Value)>) -> Self {
        Self {
            type_name: type_name.into(),
            entries: Rc::new(entries),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.entries) as *const () as usize
    }
}

/// A key and the sequence of values grouped under it
#[derive(Debug)]
pub struct Grouping {
    pub key: Value,
    pub items: Collection,
}

/// A comparable runtime value
#[derive(Clone)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Str(String),
    Seq(Collection),
    Set(Collection),
    Map(Dictionary),
    Grouping(Rc<Grouping>),
    Lazy(Rc<Lazy>),
    Record(Rc<dyn Structural>),
    Special(Special),
}

impl Value {
    pub fn seq(type_name: impl Into<String>, items: Vec<Value>) -> Value {
        Value::Seq(Collection::new(type_name, items))
    }

    /// A rectangular grid as one row-major sequence
    ///
    /// Rank is not kept: a 2x3 grid compares like a six-item sequence.
    pub fn flattened<R, T>(type_name: impl Into<String>, rows: R) -> Value
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: Inspect,
    {
        let items = rows
            .into_iter()
            .flat_map(|row| row.into_iter().map(|item| item.inspect()))
            .collect();
        Value::seq(type_name, items)
    }

    pub fn set(type_name: impl Into<String>, items: Vec<Value>) -> Value {
        Value::Set(Collection::new(type_name, items))
    }

    pub fn map(type_name: impl Into<String>, entries: Vec<(Value, Value)>) -> Value {
        Value::Map(Dictionary::new(type_name, entries))
    }

    pub fn grouping(key: impl Inspect, items: Vec<Value>) -> Value {
        let key = key.inspect();
        let type_name = format!("Grouping<{}>", key.type_name());
        Value::Grouping(Rc::new(Grouping {
            key,
            items: Collection::new(type_name, items),
        }))
    }

    pub fn lazy(type_name: impl Into<String>, init: impl FnOnce() -> Value + 'static) -> Value {
        Value::Lazy(Rc::new(Lazy::new(type_name, init)))
    }

    /// A fieldless enum variant
    pub fn enumeration(
        type_name: impl Into<String>,
        variant: impl Into<String>,
        discriminant: i64,
    ) -> Value {
        Value::Scalar(Scalar::Enum(EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
            discriminant,
        }))
    }

    /// A key/value pair as a record with `Key` and `Value` members
    pub fn entry(key: impl Inspect, value: impl Inspect) -> Value {
        Record::new("Entry")
            .with("Key", key)
            .with("Value", value)
            .into_value()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reference identity of container values
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Seq(c) | Value::Set(c) => Some(c.identity()),
            Value::Map(d) => Some(d.identity()),
            Value::Grouping(g) => Some(Rc::as_ptr(g) as *const () as usize),
            Value::Record(r) => Some(Rc::as_ptr(r) as *const () as usize),
            _ => None,
        }
    }

    /// Declared type name of the value
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Scalar(s) => s.type_name(),
            Value::Str(_) => "String".to_string(),
            Value::Seq(c) | Value::Set(c) => c.type_name().to_string(),
            Value::Map(d) => d.type_name().to_string(),
            Value::Grouping(g) => g.items.type_name().to_string(),
            Value::Lazy(l) => l.type_name().to_string(),
            Value::Record(r) => r.type_name(),
            Value::Special(s) => s.kind().type_name().to_string(),
        }
    }

    /// Items of a sequence or set
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(c) | Value::Set(c) => Some(c.items()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::format(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", crate::render::format(self))
    }
}
