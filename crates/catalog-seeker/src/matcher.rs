//! Linear-time substring matching with a prefix (failure) table.
//!
//! [`contains`] answers "does `pattern` occur in `text`?" in `O(n + m)` time
//! and `O(m)` extra space, independent of alphabet size. Matching is exact:
//! `&str` inputs are compared byte by byte, so callers that want
//! case-insensitive search must fold both sides first.
//!
//! ```
//! use catalog_seeker::matcher::{build_prefix_table, contains};
//!
//! assert!(contains("abxabcabcaby", "abcaby"));
//! assert!(!contains("aaaa", "aaaaa"));
//! assert_eq!(build_prefix_table(b"abcaby"), vec![0, 0, 0, 1, 2, 0]);
//! ```

/// Builds the prefix table for `pattern`.
///
/// Entry `i` is the length of the longest proper prefix of `pattern[..=i]`
/// that is also a suffix of it. The returned table has the same length as
/// the pattern; `table[0]` is always `0`.
pub fn build_prefix_table<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];

    for i in 1..pattern.len() {
        let mut j = table[i - 1];
        while j > 0 && pattern[i] != pattern[j] {
            j = table[j - 1];
        }
        if pattern[i] == pattern[j] {
            j += 1;
        }
        table[i] = j;
    }

    table
}

/// Returns `true` if `pattern` occurs as a substring of `text`.
///
/// Every string contains the empty string, so an empty pattern matches any
/// text (including the empty one).
pub fn contains(text: &str, pattern: &str) -> bool {
    contains_seq(text.as_bytes(), pattern.as_bytes())
}

/// Returns `true` if `pattern` occurs as a contiguous run inside `text`.
pub fn contains_seq<T: PartialEq>(text: &[T], pattern: &[T]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    let table = build_prefix_table(pattern);
    scan(text, pattern, &table)
}

// The table must have been built from `pattern`, and `pattern` must be non-empty.
fn scan<T: PartialEq>(text: &[T], pattern: &[T], table: &[usize]) -> bool {
    let mut j = 0;

    for item in text {
        while j > 0 && *item != pattern[j] {
            j = table[j - 1];
        }
        if *item == pattern[j] {
            j += 1;
        }
        if j == pattern.len() {
            return true;
        }
    }

    false
}

/// A pattern compiled once and tested against many texts.
///
/// Search over a collection tests the same pattern against several fields of
/// every record; holding the table here avoids rebuilding it per field.
///
/// ```
/// use catalog_seeker::matcher::PatternMatcher;
///
/// let matcher = PatternMatcher::new("bag");
/// assert!(matcher.is_match("leather bag"));
/// assert!(!matcher.is_match("Bag"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    pattern: String,
    table: Vec<usize>,
}

impl PatternMatcher {
    /// Compiles `pattern`.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let table = build_prefix_table(pattern.as_bytes());
        PatternMatcher { pattern, table }
    }

    /// Returns the pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the prefix table.
    pub fn prefix_table(&self) -> &[usize] {
        &self.table
    }

    /// Returns `true` if the pattern is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Returns `true` if the pattern occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        if self.pattern.is_empty() {
            return true;
        }
        scan(text.as_bytes(), self.pattern.as_bytes(), &self.table)
    }
}
