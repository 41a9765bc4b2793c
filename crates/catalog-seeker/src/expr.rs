//! Compact filter expressions.
//!
//! An expression is a comma-separated list of `field OP value` clauses, all
//! of which must hold:
//!
//! ```text
//! brand=Nike, price>=100, product_name~bag
//! ```
//!
//! | Symbol | Operator |
//! |--------|----------|
//! | `=` `!=` | equality |
//! | `~` | substring (prefix-table matcher) |
//! | `^=` `$=` | starts with / ends with |
//! | `=~` | regex |
//! | `>` `>=` `<` `<=` | numeric comparison |
//!
//! With `=` and `!=` the value stays untyped until it meets a field, so
//! `product_name=42` compares text while `price=42` compares numbers.
//! Ordering comparisons require a number.

use regex::Regex;

use crate::clause::{Clause, ClauseValue};
use crate::error::{Result, SeekerError};
use crate::op::Op;
use crate::query::Query;
use crate::value::Number;

// Longest symbols first so `>=` is not read as `>` followed by `=`.
const OPERATORS: &[(&str, Op)] = &[
    ("!=", Op::Ne),
    ("^=", Op::StartsWith),
    ("$=", Op::EndsWith),
    ("=~", Op::Regex),
    (">=", Op::Gte),
    ("<=", Op::Lte),
    ("=", Op::Eq),
    ("~", Op::Contains),
    (">", Op::Gt),
    ("<", Op::Lt),
];

const OPERATOR_CHARS: &[char] = &['=', '!', '~', '^', '$', '>', '<'];

/// Parses a single `field OP value` clause.
pub fn parse_clause(expr: &str) -> Result<Clause> {
    let start = expr
        .find(OPERATOR_CHARS)
        .ok_or_else(|| SeekerError::expression(expr, "missing operator"))?;

    let field = expr[..start].trim();
    if field.is_empty() {
        return Err(SeekerError::expression(expr, "missing field name"));
    }

    let rest = &expr[start..];
    let (symbol, op) = OPERATORS
        .iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .copied()
        .ok_or_else(|| SeekerError::expression(expr, "unknown operator"))?;

    let raw = rest[symbol.len()..].trim();
    if raw.is_empty() {
        return Err(SeekerError::expression(expr, "missing value"));
    }

    let value = literal(expr, op, raw)?;
    Ok(Clause::new(field, op, value))
}

/// Parses a comma-separated list of clauses. Blank segments are skipped.
pub fn parse_filter(expr: &str) -> Result<Vec<Clause>> {
    expr.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_clause)
        .collect()
}

fn literal(expr: &str, op: Op, raw: &str) -> Result<ClauseValue> {
    match op {
        Op::Regex => Ok(ClauseValue::Regex(Regex::new(raw)?)),
        Op::Contains | Op::StartsWith | Op::EndsWith => Ok(ClauseValue::from(raw)),
        Op::Eq | Op::Ne => Ok(ClauseValue::Literal(raw.to_string())),
        _ => Number::parse(raw)
            .map(ClauseValue::Number)
            .ok_or_else(|| SeekerError::expression(expr, "comparison needs a number")),
    }
}

impl Query {
    /// Builds a query whose AND group is the parsed expression.
    ///
    /// ```
    /// use catalog_seeker::Query;
    ///
    /// let query = Query::parse_filter("brand=Nike, price>=100").unwrap();
    /// assert_eq!(query.and_clauses().len(), 2);
    /// ```
    pub fn parse_filter(expr: &str) -> Result<Query> {
        Query::new().and_expr(expr)
    }

    /// Appends the parsed clauses to this query's AND group.
    pub fn and_expr(self, expr: &str) -> Result<Self> {
        Ok(parse_filter(expr)?
            .into_iter()
            .fold(self, |query, clause| query.and_clause(clause)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn parses_each_operator() {
        let cases = [
            ("a=1", Op::Eq),
            ("a!=1", Op::Ne),
            ("a~x", Op::Contains),
            ("a^=x", Op::StartsWith),
            ("a$=x", Op::EndsWith),
            ("a=~x", Op::Regex),
            ("a>1", Op::Gt),
            ("a>=1", Op::Gte),
            ("a<1", Op::Lt),
            ("a<=1", Op::Lte),
        ];
        for (expr, op) in cases {
            let clause = parse_clause(expr).unwrap();
            assert_eq!(clause.field, "a", "{expr}");
            assert_eq!(clause.op, op, "{expr}");
        }
    }

    #[test]
    fn equality_literals_follow_the_field_kind() {
        let clause = parse_clause("standard_delivery = true").unwrap();
        assert!(matches!(clause.value, ClauseValue::Literal(_)));
        assert!(clause.matches(&Value::Bool(true)));
        assert!(!clause.matches(&Value::Bool(false)));

        let clause = parse_clause("product_id=3").unwrap();
        assert!(clause.matches(&Value::Number(Number::U64(3))));
        assert!(clause.matches(&Value::Number(Number::F64(3.0))));

        let clause = parse_clause("product_name=42").unwrap();
        assert!(clause.matches(&Value::String("42")));
        assert!(!clause.matches(&Value::String("Tote")));

        let clause = parse_clause("brand = Nike Air").unwrap();
        assert!(clause.matches(&Value::String("Nike Air")));
        assert!(!clause.matches(&Value::Number(Number::I64(1))));
    }

    #[test]
    fn not_equal_holds_on_other_kinds_and_missing_fields() {
        let clause = parse_clause("product_name!=42").unwrap();
        assert!(!clause.matches(&Value::String("42")));
        assert!(clause.matches(&Value::String("Tote")));
        assert!(clause.matches(&Value::None));

        let clause = parse_clause("price!=cheap").unwrap();
        assert!(clause.matches(&Value::Number(Number::F64(10.0))));
    }

    #[test]
    fn comparisons_are_numeric() {
        let clause = parse_clause("price >= 99.5").unwrap();
        assert!(clause.matches(&Value::Number(Number::F64(100.0))));
        assert!(!clause.matches(&Value::String("100")));
    }

    #[test]
    fn contains_keeps_numeric_text_as_string() {
        let clause = parse_clause("product_name~42").unwrap();
        assert!(clause.matches(&Value::String("Model 42 bag")));
    }

    #[test]
    fn errors() {
        assert!(matches!(
            parse_clause("brand"),
            Err(SeekerError::InvalidExpression { reason: "missing operator", .. })
        ));
        assert!(matches!(
            parse_clause("=Nike"),
            Err(SeekerError::InvalidExpression { reason: "missing field name", .. })
        ));
        assert!(matches!(
            parse_clause("brand="),
            Err(SeekerError::InvalidExpression { reason: "missing value", .. })
        ));
        assert!(matches!(
            parse_clause("brand!x"),
            Err(SeekerError::InvalidExpression { reason: "unknown operator", .. })
        ));
        assert!(matches!(
            parse_clause("price>cheap"),
            Err(SeekerError::InvalidExpression { reason: "comparison needs a number", .. })
        ));
        assert!(matches!(parse_clause("name=~("), Err(SeekerError::InvalidRegex(_))));
    }

    #[test]
    fn filter_list_skips_blanks() {
        let clauses = parse_filter(" brand=Nike, ,price<50 ,").unwrap();
        assert_eq!(clauses.len(), 2);
        assert!(parse_filter("").unwrap().is_empty());
    }

    #[test]
    fn query_round_trips_through_summary() {
        let query = Query::parse_filter("brand=Nike,price>=100").unwrap();
        assert_eq!(query.summary(), "brand=Nike, price>=100");
    }
}
