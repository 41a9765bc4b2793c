//! Property-based tests for the matcher, the merge sort, and queries.

use proptest::prelude::*;
use catalog_seeker::matcher::{build_prefix_table, contains, contains_seq, PatternMatcher};
use catalog_seeker::sort::{merge_sort_by, try_merge_sort_by};
use catalog_seeker::{Number, Query, Value};

// ============================================================================
// Test helpers
// ============================================================================

fn naive_contains(text: &[u8], pattern: &[u8]) -> bool {
    pattern.is_empty() || text.windows(pattern.len()).any(|w| w == pattern)
}

fn naive_prefix_entry(prefix: &[u8]) -> usize {
    (0..prefix.len())
        .rev()
        .find(|&k| prefix[..k] == prefix[prefix.len() - k..])
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
struct Row {
    key: u8,
    seq: usize,
    name: String,
}

fn row_accessor<'a>(row: &'a Row, field: &str) -> Value<'a> {
    match field {
        "key" => Value::Number(Number::from(row.key as u32)),
        "name" => Value::String(&row.name),
        _ => Value::None,
    }
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..5, "[a-c]{0,6}"), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(seq, (key, name))| Row { key, seq, name })
            .collect()
    })
}

// Small alphabets make repeated prefixes, and therefore fallbacks, likely.
fn small_text() -> impl Strategy<Value = String> {
    "[ab]{0,30}"
}

fn small_pattern() -> impl Strategy<Value = String> {
    "[ab]{0,6}"
}

// ============================================================================
// Matcher properties
// ============================================================================

proptest! {
    /// The matcher agrees with a brute-force window scan.
    #[test]
    fn contains_agrees_with_naive(text in small_text(), pattern in small_pattern()) {
        prop_assert_eq!(
            contains(&text, &pattern),
            naive_contains(text.as_bytes(), pattern.as_bytes())
        );
    }

    /// Same, over arbitrary bytes.
    #[test]
    fn contains_seq_agrees_with_naive(
        text in prop::collection::vec(0u8..4, 0..40),
        pattern in prop::collection::vec(0u8..4, 0..5),
    ) {
        prop_assert_eq!(contains_seq(&text, &pattern), naive_contains(&text, &pattern));
    }

    /// Every string contains the empty pattern.
    #[test]
    fn empty_pattern_always_matches(text in ".{0,20}") {
        prop_assert!(contains(&text, ""));
    }

    /// A non-empty pattern never occurs in an empty text.
    #[test]
    fn empty_text_matches_only_empty_pattern(pattern in ".{1,10}") {
        prop_assert!(!contains("", &pattern));
    }

    /// Any slice of the text is found in it.
    #[test]
    fn substrings_are_found(text in "[a-z]{1,30}", a in 0usize..30, b in 0usize..30) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let hi = hi.min(text.len());
        let lo = lo.min(hi);
        prop_assert!(contains(&text, &text[lo..hi]));
    }

    /// A pattern longer than the text is never found.
    #[test]
    fn longer_pattern_never_found(text in small_text(), extra in "[ab]{1,4}") {
        let pattern = format!("{}{}", text, extra);
        prop_assert!(!contains(&text, &pattern));
    }

    /// Each table entry is the longest proper border of that prefix.
    #[test]
    fn prefix_table_entries_are_borders(pattern in "[abc]{1,12}") {
        let bytes = pattern.as_bytes();
        let table = build_prefix_table(bytes);
        prop_assert_eq!(table.len(), bytes.len());
        prop_assert_eq!(table[0], 0);
        for (i, &entry) in table.iter().enumerate() {
            prop_assert!(entry <= i);
            prop_assert_eq!(entry, naive_prefix_entry(&bytes[..=i]));
        }
    }

    /// A compiled matcher gives the same answers as the one-shot search.
    #[test]
    fn compiled_matcher_agrees(texts in prop::collection::vec(small_text(), 0..10), pattern in small_pattern()) {
        let matcher = PatternMatcher::new(pattern.clone());
        for text in &texts {
            prop_assert_eq!(matcher.is_match(text), contains(text, &pattern));
        }
    }
}

// ============================================================================
// Sort properties
// ============================================================================

proptest! {
    /// Output is ordered and is a permutation of the input.
    #[test]
    fn sort_orders_and_permutes(items in prop::collection::vec(any::<i32>(), 0..80)) {
        let sorted = merge_sort_by(&items, |a, b| a.cmp(b));

        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }

    /// Sorting leaves the input slice untouched.
    #[test]
    fn sort_does_not_mutate_input(items in prop::collection::vec(any::<i16>(), 0..40)) {
        let before = items.clone();
        let _ = merge_sort_by(&items, |a, b| b.cmp(a));
        prop_assert_eq!(items, before);
    }

    /// Sorting sorted output changes nothing.
    #[test]
    fn sort_is_idempotent(items in prop::collection::vec(any::<i32>(), 0..60)) {
        let once = merge_sort_by(&items, |a, b| a.cmp(b));
        let twice = merge_sort_by(&once, |a, b| a.cmp(b));
        prop_assert_eq!(once, twice);
    }

    /// Equal keys keep their input order.
    #[test]
    fn sort_is_stable(rows in rows_strategy()) {
        let sorted = merge_sort_by(&rows, |a, b| a.key.cmp(&b.key));
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].key <= pair[1].key);
            if pair[0].key == pair[1].key {
                prop_assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    /// The merge sort matches the standard library's stable sort.
    #[test]
    fn sort_matches_std_stable_sort(rows in rows_strategy()) {
        let ours: Vec<usize> = merge_sort_by(&rows, |a, b| b.key.cmp(&a.key))
            .iter()
            .map(|r| r.seq)
            .collect();

        let mut std_sorted = rows.clone();
        std_sorted.sort_by(|a, b| b.key.cmp(&a.key));
        let theirs: Vec<usize> = std_sorted.iter().map(|r| r.seq).collect();

        prop_assert_eq!(ours, theirs);
    }

    /// A comparator that never fails behaves like the infallible sort.
    #[test]
    fn try_sort_matches_sort(items in prop::collection::vec(any::<u8>(), 0..50)) {
        let fallible: Result<Vec<u8>, ()> = try_merge_sort_by(&items, |a, b| Ok(a.cmp(b)));
        prop_assert_eq!(fallible, Ok(merge_sort_by(&items, |a, b| a.cmp(b))));
    }
}

// ============================================================================
// Query properties
// ============================================================================

proptest! {
    /// Filtering never grows the collection.
    #[test]
    fn filter_never_grows(rows in rows_strategy(), key in 0u8..5) {
        let query = Query::new().and_gte("key", key as u32);
        prop_assert!(query.filter(&rows, row_accessor).len() <= rows.len());
    }

    /// A contains clause selects exactly what the matcher accepts.
    #[test]
    fn contains_clause_agrees_with_matcher(rows in rows_strategy(), pattern in "[a-c]{0,3}") {
        let query = Query::new().and_contains("name", &pattern);
        let found: Vec<usize> = query.filter(&rows, row_accessor).iter().map(|r| r.seq).collect();
        let expected: Vec<usize> = rows
            .iter()
            .filter(|r| contains(&r.name, &pattern))
            .map(|r| r.seq)
            .collect();
        prop_assert_eq!(found, expected);
    }

    /// Ordered results are a stable sort of the unordered ones.
    #[test]
    fn ordered_filter_is_stable(rows in rows_strategy()) {
        let found = Query::new().order_desc("key").filter(&rows, row_accessor);
        for pair in found.windows(2) {
            prop_assert!(pair[0].key >= pair[1].key);
            if pair[0].key == pair[1].key {
                prop_assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    /// Count ignores paging; filter honours it.
    #[test]
    fn paging_bounds(rows in rows_strategy(), offset in 0usize..50, limit in 0usize..50) {
        let query = Query::new().offset(offset).limit(limit);
        let total = query.count(&rows, row_accessor);
        let page = query.filter(&rows, row_accessor);
        prop_assert_eq!(total, rows.len());
        prop_assert_eq!(page.len(), rows.len().saturating_sub(offset).min(limit));
    }

    /// OR of a clause and its negation matches everything with that field.
    #[test]
    fn or_with_complement_is_total(rows in rows_strategy(), key in 0u8..5) {
        let query = Query::new().or_eq("key", key as u32).or("key", catalog_seeker::Op::Ne, key as u32);
        prop_assert_eq!(query.count(&rows, row_accessor), rows.len());
    }
}
