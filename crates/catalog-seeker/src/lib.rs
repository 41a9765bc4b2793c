//! Catalog seeker - search and ordering primitives for in-memory records.
//!
//! Two algorithms sit at the bottom of this crate:
//!
//! - [`matcher`]: prefix-table (KMP) substring search, linear in
//!   `text + pattern`.
//! - [`sort`]: a stable top-down merge sort driven by a caller-supplied
//!   comparator.
//!
//! On top of them sits a small query engine. Records expose fields through
//! an accessor (or the [`Seekable`] trait); a [`Query`] filters them with
//! AND/OR/NOT clause groups, orders the matches with the merge sort, and
//! pages the result.
//!
//! # Quick Start
//!
//! ```rust
//! use catalog_seeker::{Number, Query, Value};
//!
//! struct Product {
//!     name: String,
//!     brand: String,
//!     price: f64,
//! }
//!
//! fn accessor<'a>(p: &'a Product, field: &str) -> Value<'a> {
//!     match field {
//!         "name" => Value::String(&p.name),
//!         "brand" => Value::String(&p.brand),
//!         "price" => Value::Number(Number::F64(p.price)),
//!         _ => Value::None,
//!     }
//! }
//!
//! let products = vec![
//!     Product { name: "Runner".into(), brand: "Nike".into(), price: 120.0 },
//!     Product { name: "Tote".into(), brand: "Canvas Co".into(), price: 20.0 },
//!     Product { name: "Belt".into(), brand: "Nike".into(), price: 35.0 },
//! ];
//!
//! let query = Query::new()
//!     .and_eq("brand", "Nike")
//!     .order_asc("price")
//!     .build();
//!
//! let results = query.filter(&products, accessor);
//! assert_eq!(results[0].name, "Belt");
//! assert_eq!(results[1].name, "Runner");
//! ```
//!
//! The same query can be written as a filter expression:
//!
//! ```rust
//! use catalog_seeker::Query;
//!
//! let query = Query::parse_filter("brand=Nike").unwrap().order_asc("price");
//! assert_eq!(query.summary(), "brand=Nike");
//! ```
//!
//! Text operators (`^=`, `$=`, `~`, `=~`) only ever match string fields.
//! Equality works on every value kind, and the ordering operators work on
//! numbers and timestamps. A clause never matches a missing field or a value
//! of another kind, except `!=`, which holds whenever `=` does not. Matching
//! is case-sensitive; lowercase both sides for case-insensitive search.

mod clause;
mod error;
mod expr;
mod op;
mod ordering;
mod query;
mod traits;
mod value;

pub mod matcher;
pub mod sort;

pub use clause::{Clause, ClauseValue};
pub use error::{Result, SeekerError};
pub use expr::{parse_clause, parse_filter};
pub use matcher::{build_prefix_table, contains, PatternMatcher};
pub use op::Op;
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use query::Query;
pub use sort::{merge_sort_by, merge_sort_by_key, try_merge_sort_by};
pub use traits::Seekable;
pub use value::{Number, Timestamp, Value};
