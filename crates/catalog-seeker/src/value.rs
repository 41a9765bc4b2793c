//! Runtime field values.
//!
//! A [`Value`] is what a record hands back when asked for one of its fields:
//! text, a number, a timestamp, a flag, or nothing at all (null or unknown
//! field).

use std::cmp::Ordering;

/// Field value borrowed from a record.
///
/// ```
/// use catalog_seeker::{Number, Value};
///
/// struct Product {
///     name: String,
///     price: f64,
/// }
///
/// fn accessor<'a>(p: &'a Product, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&p.name),
///         "price" => Value::Number(Number::F64(p.price)),
///         _ => Value::None,
///     }
/// }
///
/// let tote = Product { name: "Tote".into(), price: 20.0 };
/// assert_eq!(accessor(&tote, "name").as_str(), Some("Tote"));
/// assert!(accessor(&tote, "sku").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    /// Point in time.
    Timestamp(Timestamp),
    Bool(bool),
    /// Null, missing, or unknown field.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        *self == Value::None
    }

    pub fn as_str(&self) -> Option<&'a str> {
        if let Value::String(s) = *self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        if let Value::Number(n) = *self {
            Some(n)
        } else {
            None
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        if let Value::Timestamp(t) = *self {
            Some(t)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = *self {
            Some(b)
        } else {
            None
        }
    }

    /// Name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }
}

/// Numeric value.
///
/// Integers compare exactly with each other, whatever their sign; a float on
/// either side moves the comparison to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    fn as_integer(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }

    /// Reads a decimal literal. Integers stay exact; non-finite floats are
    /// rejected.
    pub fn parse(raw: &str) -> Option<Number> {
        if let Ok(n) = raw.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = raw.parse::<u64>() {
            return Some(Number::U64(n));
        }
        raw.parse::<f64>().ok().filter(|n| n.is_finite()).map(Number::F64)
    }

    /// Orders two numbers. `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i32, i64);
number_from!(U64 as u64: u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Milliseconds since the Unix epoch.
///
/// ```
/// use catalog_seeker::Timestamp;
///
/// assert!(Timestamp(1_000) < Timestamp(2_000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
