//! Stable top-down merge sort driven by a caller-supplied comparator.
//!
//! [`merge_sort_by`] never mutates its input: it returns a new `Vec` holding
//! the same elements, ordered by `compare`. Elements the comparator reports
//! as [`Ordering::Equal`] keep their original relative order.
//!
//! ```
//! use catalog_seeker::sort::merge_sort_by;
//!
//! let words = ["pear", "fig", "apple", "kiwi"];
//! let by_len = merge_sort_by(&words, |a, b| a.len().cmp(&b.len()));
//! assert_eq!(by_len, ["fig", "pear", "kiwi", "apple"]);
//! ```
//!
//! The comparator only has to be deterministic for the duration of one
//! call. An inconsistent comparator still produces a complete permutation
//! of the input, in an unspecified order.

use std::cmp::Ordering;
use std::convert::Infallible;

/// Sorts `items` by `compare`, returning a new vector.
///
/// Runs in `O(n log n)` comparisons. Slices of length 0 or 1 are returned
/// as-is.
pub fn merge_sort_by<T, F>(items: &[T], mut compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let result = try_merge_sort_by(items, |a, b| Ok::<_, Infallible>(compare(a, b)));
    match result {
        Ok(sorted) => sorted,
        Err(never) => match never {},
    }
}

/// Sorts `items` by `key`, ascending.
pub fn merge_sort_by_key<T, K, F>(items: &[T], mut key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    merge_sort_by(items, |a, b| key(a).cmp(&key(b)))
}

/// Sorts `items` with a fallible comparator.
///
/// The first error the comparator returns aborts the sort and is handed
/// back unchanged.
pub fn try_merge_sort_by<T, E, F>(items: &[T], mut compare: F) -> Result<Vec<T>, E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    sort_slice(items, &mut compare)
}

fn sort_slice<T, E, F>(items: &[T], compare: &mut F) -> Result<Vec<T>, E>
where
    T: Clone,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if items.len() <= 1 {
        return Ok(items.to_vec());
    }

    let mid = items.len() / 2;
    let left = sort_slice(&items[..mid], compare)?;
    let right = sort_slice(&items[mid..], compare)?;

    try_merge(left, right, &mut *compare)
}

/// Merges two sorted runs into one.
///
/// The head of `left` is taken whenever it does not compare greater than
/// the head of `right`, so on ties `left` elements come first. Once either
/// run is exhausted the remainder of the other is appended in order.
pub fn merge<T, F>(left: Vec<T>, right: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    match try_merge(left, right, |a, b| Ok::<_, Infallible>(compare(a, b))) {
        Ok(merged) => merged,
        Err(never) => match never {},
    }
}

/// Fallible form of [`merge`].
pub fn try_merge<T, E, F>(left: Vec<T>, right: Vec<T>, mut compare: F) -> Result<Vec<T>, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(l, r)? != Ordering::Greater {
            merged.extend(left.next());
        } else {
            merged.extend(right.next());
        }
    }

    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
