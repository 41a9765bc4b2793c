//! Query builder and executor.
//!
//! A [`Query`] holds three clause groups, a list of sort keys, and optional
//! paging. Matching follows fixed logic:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, or there are no OR clauses)
//!       ∧ (no NOT clause matches)
//! ```
//!
//! Matches are ordered with the stable merge sort, so records that tie on
//! every sort key stay in collection order. Offset and limit apply last.

use regex::Regex;

use crate::clause::{Clause, ClauseValue};
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::sort::merge_sort_by;
use crate::value::Value;

/// A query for filtering and ordering collections.
///
/// ```
/// use catalog_seeker::{Dir, Query};
///
/// let query = Query::new()
///     .and_gte("price", 100)
///     .or_contains("brand", "nik")
///     .or_contains("brand", "adi")
///     .not_eq("material", "plastic")
///     .order_by("price", Dir::Desc)
///     .limit(20)
///     .build();
/// assert_eq!(query.summary(), "price>=100, brand~nik|brand~adi, !material=plastic");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Creates an empty query, which matches everything.
    pub fn new() -> Self {
        Query::default()
    }

    pub fn and(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.and_clauses.push(Clause::new(field, op, value));
        self
    }

    pub fn or(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.or_clauses.push(Clause::new(field, op, value));
        self
    }

    pub fn not(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.not_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Appends an already-built clause to the AND group.
    pub fn and_clause(mut self, clause: Clause) -> Self {
        self.and_clauses.push(clause);
        self
    }

    pub fn and_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Eq, value)
    }

    pub fn and_ne(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Ne, value)
    }

    pub fn and_gt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gt, value)
    }

    pub fn and_gte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gte, value)
    }

    pub fn and_lt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lt, value)
    }

    pub fn and_lte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lte, value)
    }

    pub fn and_contains(self, field: &str, value: &str) -> Self {
        self.and(field, Op::Contains, value)
    }

    /// Adds an AND regex clause. Fails if `pattern` does not compile.
    pub fn and_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.and(field, Op::Regex, regex))
    }

    pub fn or_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Eq, value)
    }

    pub fn or_contains(self, field: &str, value: &str) -> Self {
        self.or(field, Op::Contains, value)
    }

    pub fn or_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.or(field, Op::Regex, regex))
    }

    pub fn not_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.not(field, Op::Eq, value)
    }

    pub fn not_contains(self, field: &str, value: &str) -> Self {
        self.not(field, Op::Contains, value)
    }

    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn build(self) -> Self {
        self
    }

    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    pub fn or_clauses(&self) -> &[Clause] {
        &self.or_clauses
    }

    pub fn not_clauses(&self) -> &[Clause] {
        &self.not_clauses
    }

    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns `true` if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    /// One-line description of the clauses, e.g. for "filtered by ..." text.
    ///
    /// AND clauses are listed as-is, OR clauses joined with `|`, NOT clauses
    /// prefixed with `!`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.and_clauses.iter().map(Clause::to_string).collect();
        if !self.or_clauses.is_empty() {
            let any: Vec<String> = self.or_clauses.iter().map(Clause::to_string).collect();
            parts.push(any.join("|"));
        }
        parts.extend(self.not_clauses.iter().map(|c| format!("!{}", c)));
        parts.join(", ")
    }

    /// Tests a single item.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let check = |clause: &Clause| clause.matches(&accessor(item, &clause.field));

        self.and_clauses.iter().all(check)
            && (self.or_clauses.is_empty() || self.or_clauses.iter().any(check))
            && !self.not_clauses.iter().any(check)
    }

    /// Returns references to matching items, ordered, then paged.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let matched: Vec<&'a T> = items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect();

        let ordered = if self.orderings.is_empty() {
            matched
        } else {
            merge_sort_by(&matched, |a, b| {
                compare_by_orderings(*a, *b, &self.orderings, &accessor)
            })
        };

        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        ordered.into_iter().skip(offset).take(limit).collect()
    }

    /// Like [`filter`](Self::filter), cloning the results.
    pub fn filter_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter(items, accessor).into_iter().cloned().collect()
    }

    /// Counts matching items, ignoring paging.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().any(|item| self.matches(item, &accessor))
    }

    pub fn all<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().all(|item| self.matches(item, &accessor))
    }

    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        items.iter().find(|item| self.matches(*item, &accessor))
    }

    pub fn position<T, F>(&self, items: &[T], accessor: F) -> Option<usize>
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().position(|item| self.matches(item, &accessor))
    }
}
