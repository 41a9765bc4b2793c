//! Clause types for query predicates.
//!
//! A [`Clause`] is a single filter predicate: a field name, an operator, and
//! the value to compare against.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use crate::matcher::{self, PatternMatcher};
use crate::op::Op;
use crate::value::{Number, Timestamp, Value};

/// A single filter predicate.
///
/// ```
/// use catalog_seeker::{Clause, Op, Value};
///
/// let clause = Clause::new("brand", Op::Contains, "nik");
/// assert!(clause.matches(&Value::String("nike")));
/// assert!(!clause.matches(&Value::String("Nike")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a new clause.
    ///
    /// A string value paired with [`Op::Contains`] is compiled into a
    /// [`PatternMatcher`] up front, so evaluating the clause against many
    /// records reuses one prefix table.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        let value = match (op, value.into()) {
            (Op::Contains, ClauseValue::String(s)) => ClauseValue::Pattern(PatternMatcher::new(s)),
            (_, other) => other,
        };
        Clause {
            field: field.into(),
            op,
            value,
        }
    }

    /// Evaluates this clause against a field value.
    ///
    /// Type mismatches and missing values never match, except under
    /// [`Op::Ne`], which always holds exactly when [`Op::Eq`] would not.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match self.op {
            Op::Ne => !self.test(Op::Eq, field_value),
            op => self.test(op, field_value),
        }
    }

    fn test(&self, op: Op, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ClauseValue::Literal(text), value) => op == Op::Eq && literal_equals(text, value),

            (ClauseValue::String(pattern), Value::String(s)) => match_string(op, s, pattern),

            (ClauseValue::Pattern(m), Value::String(s)) => op == Op::Contains && m.is_match(s),

            (ClauseValue::Regex(regex), Value::String(s)) => op == Op::Regex && regex.is_match(s),

            (ClauseValue::Number(clause_num), Value::Number(field_num)) => field_num
                .compare(*clause_num)
                .is_some_and(|ordering| op.holds(ordering)),

            (ClauseValue::Timestamp(clause_ts), Value::Timestamp(field_ts)) => {
                op.holds(field_ts.cmp(clause_ts))
            }

            (ClauseValue::Bool(clause_bool), Value::Bool(field_bool)) => {
                op == Op::Eq && field_bool == clause_bool
            }

            // Missing fields and type mismatches.
            _ => false,
        }
    }
}

fn match_string(op: Op, field: &str, pattern: &str) -> bool {
    match op {
        Op::Eq => field == pattern,
        Op::StartsWith => field.starts_with(pattern),
        Op::EndsWith => field.ends_with(pattern),
        Op::Contains => matcher::contains(field, pattern),
        _ => false,
    }
}

/// Equality for an untyped literal, read as whatever kind the field holds.
fn literal_equals(text: &str, value: &Value<'_>) -> bool {
    match value {
        Value::String(s) => *s == text,
        Value::Number(n) => Number::parse(text)
            .and_then(|literal| n.compare(literal))
            .is_some_and(Ordering::is_eq),
        Value::Timestamp(ts) => text.parse::<i64>().is_ok_and(|millis| ts.as_millis() == millis),
        Value::Bool(b) => text.parse::<bool>().is_ok_and(|literal| *b == literal),
        Value::None => false,
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op.symbol(), self.value)
    }
}

/// Owned value stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    String(String),
    /// Untyped text from a filter expression, compared for equality against
    /// whatever kind of value the field holds.
    Literal(String),
    /// Compiled substring pattern for [`Op::Contains`].
    Pattern(PatternMatcher),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    Regex(Regex),
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::String(s) | ClauseValue::Literal(s) => write!(f, "{}", s),
            ClauseValue::Pattern(m) => write!(f, "{}", m.pattern()),
            ClauseValue::Number(Number::I64(n)) => write!(f, "{}", n),
            ClauseValue::Number(Number::U64(n)) => write!(f, "{}", n),
            ClauseValue::Number(Number::F64(n)) => write!(f, "{}", n),
            ClauseValue::Timestamp(t) => write!(f, "{}", t.as_millis()),
            ClauseValue::Bool(b) => write!(f, "{}", b),
            ClauseValue::Regex(r) => write!(f, "{}", r.as_str()),
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<PatternMatcher> for ClauseValue {
    fn from(m: PatternMatcher) -> Self {
        ClauseValue::Pattern(m)
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<Timestamp> for ClauseValue {
    fn from(t: Timestamp) -> Self {
        ClauseValue::Timestamp(t)
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

impl From<i32> for ClauseValue {
    fn from(n: i32) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<u32> for ClauseValue {
    fn from(n: u32) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<u64> for ClauseValue {
    fn from(n: u64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}

impl From<f64> for ClauseValue {
    fn from(n: f64) -> Self {
        ClauseValue::Number(Number::from(n))
    }
}
