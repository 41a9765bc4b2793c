//! Search and sort over a product snapshot.
//!
//! Handlers take a snapshot from the store, then call [`browse`] (or
//! [`search`] and [`sort`] separately). Nothing here holds state between
//! calls; a create, update, or delete is picked up by taking a fresh
//! snapshot on the next request.

use std::cmp::Ordering;
use std::fmt;

use catalog_seeker::sort::merge_sort_by;
use catalog_seeker::{OrderBy, PatternMatcher, Seekable};
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Sort choices offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Snapshot order (newest first).
    #[default]
    Newest,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Newest,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Parses the `sort` select value. Unknown or empty values give `None`.
    pub fn parse(s: &str) -> Option<SortOption> {
        Self::ALL.into_iter().find(|opt| opt.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::NameAsc => "Name (A-Z)",
            SortOption::NameDesc => "Name (Z-A)",
            SortOption::PriceAsc => "Price (Low to High)",
            SortOption::PriceDesc => "Price (High to Low)",
        }
    }

    /// Comparator for this option.
    ///
    /// Names compare case-insensitively, then by raw bytes so the order is
    /// total. Prices compare numerically; NaN ties with everything.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Newest => Ordering::Equal,
            SortOption::NameAsc => compare_names(a, b),
            SortOption::NameDesc => compare_names(b, a),
            SortOption::PriceAsc => compare_prices(&OrderBy::asc("price"), a, b),
            SortOption::PriceDesc => compare_prices(&OrderBy::desc("price"), a, b),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.product_name
        .to_lowercase()
        .cmp(&b.product_name.to_lowercase())
        .then_with(|| a.product_name.cmp(&b.product_name))
}

fn compare_prices(key: &OrderBy, a: &Product, b: &Product) -> Ordering {
    key.compare(
        &a.seeker_field_value(&key.field),
        &b.seeker_field_value(&key.field),
    )
    .unwrap_or(Ordering::Equal)
}

/// Keeps products whose name, category, or brand contains the query.
///
/// The query is trimmed and lowercased, and each field is lowercased before
/// matching. An empty query keeps everything.
pub fn search(snapshot: &[Product], raw_query: &str) -> Vec<Product> {
    let needle = raw_query.trim().to_lowercase();
    if needle.is_empty() {
        return snapshot.to_vec();
    }

    let matcher = PatternMatcher::new(needle);
    let found: Vec<Product> = snapshot
        .iter()
        .filter(|p| {
            [&p.product_name, &p.product_type, &p.brand]
                .into_iter()
                .any(|field| matcher.is_match(&field.to_lowercase()))
        })
        .cloned()
        .collect();

    tracing::debug!(query = matcher.pattern(), matched = found.len(), of = snapshot.len(), "search");
    found
}

/// Reorders products by `option`. Ties keep their snapshot order.
pub fn sort(items: &[Product], option: SortOption) -> Vec<Product> {
    if option == SortOption::Newest {
        return items.to_vec();
    }
    let sorted = merge_sort_by(items, |a, b| option.compare(a, b));
    tracing::debug!(sort = %option, count = sorted.len(), "sort");
    sorted
}

/// One page of the product grid.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    /// Size of the snapshot before searching.
    pub total: usize,
    /// The trimmed search query.
    pub query: String,
    pub sort: SortOption,
}

impl CatalogPage {
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Text for the "filtered by" line, if a search is active.
    pub fn filter_summary(&self) -> Option<String> {
        self.is_searching()
            .then(|| format!("matching \"{}\"", self.query))
    }
}

/// Searches, then sorts, the snapshot.
pub fn browse(snapshot: &[Product], raw_query: &str, sort_option: Option<SortOption>) -> CatalogPage {
    let sort_option = sort_option.unwrap_or_default();
    let found = search(snapshot, raw_query);
    CatalogPage {
        items: sort(&found, sort_option),
        total: snapshot.len(),
        query: raw_query.trim().to_string(),
        sort: sort_option,
    }
}
