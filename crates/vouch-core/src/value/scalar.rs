//! Scalar values and their two equality notions.
//!
//! Exact equality (used by `assert_equal`) requires the same representation:
//! an `i32` 12 is not equal to an `i64` 12. Equivalence normalises numeric
//! representations first, so any integer width, float or decimal holding the
//! same number compares equal.

use std::cmp::Ordering;
use uuid::Uuid;

use super::decimal::Decimal;

/// Declared width of an integer scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

impl IntWidth {
    pub fn name(&self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::I128 => "i128",
            IntWidth::Isize => "isize",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
            IntWidth::U128 => "u128",
            IntWidth::Usize => "usize",
        }
    }
}

/// A variant of a field-less enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: String,
    pub variant: String,
    pub discriminant: i64,
}

/// Intrinsic values compared by value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    Int { value: i128, width: IntWidth },
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Enum(EnumValue),
    Guid(Uuid),
}

impl Scalar {
    pub fn type_name(&self) -> String {
        match self {
            Scalar::Bool(_) => "bool".to_string(),
            Scalar::Char(_) => "char".to_string(),
            Scalar::Int { width, .. } => width.name().to_string(),
            Scalar::F32(_) => "f32".to_string(),
            Scalar::F64(_) => "f64".to_string(),
            Scalar::Decimal(_) => "Decimal".to_string(),
            Scalar::Enum(e) => e.type_name.clone(),
            Scalar::Guid(_) => "Uuid".to_string(),
        }
    }

    /// Same representation and same value; `NaN` equals `NaN`
    pub fn exact_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Int { value: a, width: wa }, Scalar::Int { value: b, width: wb }) => {
                wa == wb && a == b
            }
            (Scalar::F32(a), Scalar::F32(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Scalar::F64(a), Scalar::F64(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => a == b,
            _ => self == other,
        }
    }

    /// Equality after numeric normalisation
    pub fn equivalent(&self, other: &Scalar) -> bool {
        match (Numeric::of(self), Numeric::of(other)) {
            (Some(a), Some(b)) => a.equivalent(&b),
            (None, None) => self.exact_eq(other),
            _ => false,
        }
    }

    /// Ordering between two scalars of the same representation
    pub fn partial_cmp_exact(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.partial_cmp(b),
            (Scalar::Char(a), Scalar::Char(b)) => a.partial_cmp(b),
            (Scalar::Int { value: a, width: wa }, Scalar::Int { value: b, width: wb })
                if wa == wb =>
            {
                a.partial_cmp(b)
            }
            (Scalar::F32(a), Scalar::F32(b)) => a.partial_cmp(b),
            (Scalar::F64(a), Scalar::F64(b)) => a.partial_cmp(b),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => a.partial_cmp(b),
            (Scalar::Enum(a), Scalar::Enum(b)) if a.type_name == b.type_name => {
                a.discriminant.partial_cmp(&b.discriminant)
            }
            (Scalar::Guid(a), Scalar::Guid(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Width-independent view of a numeric scalar
enum Numeric {
    Int(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Numeric {
    fn of(scalar: &Scalar) -> Option<Numeric> {
        match scalar {
            Scalar::Int { value, .. } => Some(Numeric::Int(*value)),
            Scalar::F32(v) => Some(Numeric::Float(f64::from(*v))),
            Scalar::F64(v) => Some(Numeric::Float(*v)),
            Scalar::Decimal(d) => Some(Numeric::Decimal(*d)),
            _ => None,
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Numeric::Int(v) => *v as f64,
            Numeric::Float(v) => *v,
            Numeric::Decimal(d) => d.to_f64(),
        }
    }

    fn equivalent(&self, other: &Numeric) -> bool {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (Numeric::Decimal(a), Numeric::Decimal(b)) => a == b,
            (Numeric::Int(i), Numeric::Decimal(d)) | (Numeric::Decimal(d), Numeric::Int(i)) => {
                d.to_integer() == Some(*i)
            }
            (Numeric::Int(i), Numeric::Float(f)) | (Numeric::Float(f), Numeric::Int(i)) => {
                float_to_int(*f) == Some(*i)
            }
            _ => {
                let (a, b) = (self.to_f64(), other.to_f64());
                a == b || (a.is_nan() && b.is_nan())
            }
        }
    }
}

/// The integer a float holds exactly, if any
fn float_to_int(f: f64) -> Option<i128> {
    // -2^127 is exact in both types; 2^127 is one past i128::MAX
    let lower = i128::MIN as f64;
    (f.fract() == 0.0 && f >= lower && f < -lower).then(|| f as i128)
}
