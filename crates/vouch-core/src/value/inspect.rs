//! Conversion of Rust values into [`Value`] graphs.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use uuid::Uuid;

use super::{Decimal, IntWidth, Record, Scalar, Special, Structural, Uri, Value};

/// Types that can be inspected into a comparable [`Value`]
pub trait Inspect {
    fn inspect(&self) -> Value;
}

/// `std::any::type_name` with module paths stripped
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let flush = |segment: &mut String, out: &mut String| {
        let tail = segment.rsplit("::").next().unwrap_or_default();
        out.push_str(tail);
        segment.clear();
    };
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            flush(&mut segment, &mut out);
            out.push(ch);
        }
    }
    flush(&mut segment, &mut out);
    out
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(value) => value.inspect(),
            None => Value::Null,
        }
    }
}

impl<T: Structural + 'static> Inspect for Rc<T> {
    fn inspect(&self) -> Value {
        Value::Record(self.clone())
    }
}

macro_rules! inspect_int {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    Value::Scalar(Scalar::Int { value: *self as i128, width: IntWidth::$width })
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    value.inspect()
                }
            }
        )*
    };
}

inspect_int!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
);

impl Inspect for u128 {
    fn inspect(&self) -> Value {
        match i128::try_from(*self) {
            Ok(value) => Value::Scalar(Scalar::Int {
                value,
                width: IntWidth::U128,
            }),
            Err(_) => Value::Scalar(Scalar::F64(*self as f64)),
        }
    }
}

macro_rules! inspect_scalar {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Value {
                    let $v = self;
                    $body
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    value.inspect()
                }
            }
        )*
    };
}

inspect_scalar!(
    bool => |v| Value::Scalar(Scalar::Bool(*v)),
    char => |v| Value::Scalar(Scalar::Char(*v)),
    f32 => |v| Value::Scalar(Scalar::F32(*v)),
    f64 => |v| Value::Scalar(Scalar::F64(*v)),
    Decimal => |v| Value::Scalar(Scalar::Decimal(*v)),
    Uuid => |v| Value::Scalar(Scalar::Guid(*v)),
    String => |v| Value::Str(v.clone()),
    NaiveDateTime => |v| Value::Special(Special::DateTime(*v)),
    DateTime<FixedOffset> => |v| Value::Special(Special::DateTimeOffset(*v)),
    DateTime<Utc> => |v| Value::Special(Special::DateTimeOffset(DateTime::<FixedOffset>::from(*v))),
    Uri => |v| Value::Special(Special::Uri(v.clone())),
);

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

fn items<'a, T: Inspect + 'a>(iter: impl IntoIterator<Item = &'a T>) -> Vec<Value> {
    iter.into_iter().map(Inspect::inspect).collect()
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Value {
        Value::seq(short_type_name::<[T]>(), items(self))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        Value::seq(short_type_name::<[T; N]>(), items(self))
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        Value::seq(short_type_name::<Vec<T>>(), items(self))
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Value {
        Value::seq(short_type_name::<VecDeque<T>>(), items(self))
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Value {
        Value::set(short_type_name::<HashSet<T>>(), items(self))
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        Value::set(short_type_name::<BTreeSet<T>>(), items(self))
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value {
        let entries = self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        Value::map(short_type_name::<HashMap<K, V>>(), entries)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        let entries = self.iter().map(|(k, v)| (k.inspect(), v.inspect())).collect();
        Value::map(short_type_name::<BTreeMap<K, V>>(), entries)
    }
}

macro_rules! inspect_tuple {
    ($(($($name:ident : $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn inspect(&self) -> Value {
                    Record::new(short_type_name::<($($name,)+)>())
                        $(.with(stringify!($idx), self.$idx.inspect()))+
                        .into_value()
                }
            }
        )*
    };
}

inspect_tuple!(
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
);

/// JSON objects become anonymous records, arrays become sequences
impl Inspect for serde_json::Value {
    fn inspect(&self) -> Value {
        use serde_json::Value as Json;
        match self {
            Json::Null => Value::Null,
            Json::Bool(b) => b.inspect(),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.inspect()
                } else if let Some(u) = n.as_u64() {
                    u.inspect()
                } else {
                    n.as_f64().map(Value::from).unwrap_or(Value::Null)
                }
            }
            Json::String(s) => Value::Str(s.clone()),
            Json::Array(values) => Value::seq("Array", items(values)),
            Json::Object(map) => map
                .iter()
                .fold(Record::anonymous(), |record, (k, v)| record.with(k.clone(), v))
                .into_value(),
        }
    }
}
