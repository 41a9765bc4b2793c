//! Product storage.
//!
//! [`ResourceStore`] is the storage seam the routes talk to. It is
//! synchronous; the in-memory implementation never blocks for long enough to
//! matter inside an async handler.
//!
//! [`InMemoryProductStore`] keeps products in a `BTreeMap` behind a
//! `RwLock`. Listing always returns a fresh snapshot, newest first, so
//! callers can search and sort it without holding the lock.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_seeker::{merge_sort_by_key, Query, Seekable, SeekerError};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::product::{Product, ProductInput};
use crate::views::ValidationError;

/// Constraints for list operations.
///
/// Only the filter expression is applied by the store. Free-text search,
/// ordering and paging run on the returned snapshot.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    /// Filter expression, e.g. `brand=Nike, price<50`.
    pub filter: Option<String>,
}

impl ResourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Compiles the filter into a seeker [`Query`], `None` without one.
    pub fn to_query(&self) -> Result<Option<Query>, SeekerError> {
        self.filter.as_deref().map(Query::parse_filter).transpose()
    }
}

/// Storage backend for one kind of record.
///
/// - `parse_id` validates an id string before `get` fetches anything.
/// - `create` and `update` take JSON so HTTP bodies pass straight through.
pub trait ResourceStore: Send + Sync {
    type Item: Serialize + DeserializeOwned;
    type Id: Clone + Display + FromStr;
    type Error: std::error::Error + Send + 'static;

    fn parse_id(&self, id_str: &str) -> Result<Self::Id, Self::Error>;

    /// Retrieves an item by id, `None` if absent.
    fn get(&self, id: &Self::Id) -> Result<Option<Self::Item>, Self::Error>;

    fn not_found_error(id: &Self::Id) -> Self::Error;

    /// Retrieves an item by id, failing if absent.
    fn resolve(&self, id: &Self::Id) -> Result<Self::Item, Self::Error> {
        self.get(id)?.ok_or_else(|| Self::not_found_error(id))
    }

    fn list(&self, query: Option<&ResourceQuery>) -> Result<Vec<Self::Item>, Self::Error>;

    fn create(&self, data: serde_json::Value) -> Result<Self::Item, Self::Error>;

    /// Replaces the mutable fields of an existing item.
    fn update(&self, id: &Self::Id, data: serde_json::Value) -> Result<Self::Item, Self::Error>;

    fn delete(&self, id: &Self::Id) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product {0} not found")]
    NotFound(u64),

    #[error("Invalid product id '{0}'")]
    InvalidId(String),

    #[error("Invalid product: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid product payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid query: {0}")]
    Query(#[from] SeekerError),

    #[error("Could not read seed file {path}: {reason}")]
    Seed { path: String, reason: String },

    #[error("Product store lock poisoned")]
    Poisoned,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Default)]
struct Inner {
    products: BTreeMap<u64, Product>,
    last_id: u64,
}

/// Products held in memory, ids assigned from 1 upward.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `inputs`, inserted in order.
    pub fn with_products(inputs: Vec<ProductInput>) -> Result<Self, StoreError> {
        let store = Self::new();
        for input in inputs {
            store.insert(input)?;
        }
        Ok(store)
    }

    /// Reads a JSON array of product inputs.
    pub fn load_seed(path: &Path) -> Result<Vec<ProductInput>, StoreError> {
        let seed_error = |reason: String| StoreError::Seed {
            path: path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.products.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Validates and stores a new product.
    pub fn insert(&self, input: ProductInput) -> Result<Product, StoreError> {
        input.validate().map_err(StoreError::Validation)?;

        let mut inner = self.write()?;
        inner.last_id += 1;
        let product = Product::new(inner.last_id, input, Utc::now());
        inner.products.insert(product.product_id, product.clone());

        tracing::info!(product_id = product.product_id, name = %product.product_name, "product created");
        Ok(product)
    }

    /// Validates and replaces the mutable fields of product `id`.
    pub fn replace(&self, id: u64, input: ProductInput) -> Result<Product, StoreError> {
        input.validate().map_err(StoreError::Validation)?;

        let mut inner = self.write()?;
        let product = inner.products.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        product.apply(input);

        tracing::info!(product_id = id, name = %product.product_name, "product updated");
        Ok(product.clone())
    }

    /// Every product, newest first; ties on creation time go to the higher id.
    pub fn snapshot(&self) -> Result<Vec<Product>, StoreError> {
        let products: Vec<Product> = self.read()?.products.values().cloned().collect();
        Ok(merge_sort_by_key(&products, |p| Reverse((p.created_at, p.product_id))))
    }
}

impl ResourceStore for InMemoryProductStore {
    type Item = Product;
    type Id = u64;
    type Error = StoreError;

    fn parse_id(&self, id_str: &str) -> Result<Self::Id, Self::Error> {
        id_str
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| StoreError::InvalidId(id_str.to_string()))
    }

    fn get(&self, id: &Self::Id) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.read()?.products.get(id).cloned())
    }

    fn not_found_error(id: &Self::Id) -> Self::Error {
        StoreError::NotFound(*id)
    }

    fn list(&self, query: Option<&ResourceQuery>) -> Result<Vec<Self::Item>, Self::Error> {
        let snapshot = self.snapshot()?;
        match query.map(ResourceQuery::to_query).transpose()?.flatten() {
            Some(query) => Ok(query.filter_cloned(&snapshot, Product::accessor)),
            None => Ok(snapshot),
        }
    }

    fn create(&self, data: serde_json::Value) -> Result<Self::Item, Self::Error> {
        let input: ProductInput = serde_json::from_value(data)?;
        self.insert(input)
    }

    fn update(&self, id: &Self::Id, data: serde_json::Value) -> Result<Self::Item, Self::Error> {
        let input: ProductInput = serde_json::from_value(data)?;
        self.replace(*id, input)
    }

    fn delete(&self, id: &Self::Id) -> Result<(), Self::Error> {
        let mut inner = self.write()?;
        inner
            .products
            .remove(id)
            .ok_or_else(|| Self::not_found_error(id))?;

        tracing::info!(product_id = *id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64) -> ProductInput {
        ProductInput {
            product_name: name.into(),
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_resource_query_compiles_filter() {
        assert!(ResourceQuery::new().to_query().unwrap().is_none());

        let compiled = ResourceQuery::new()
            .filter("brand=Nike, price<50")
            .to_query()
            .unwrap()
            .unwrap();
        assert_eq!(compiled.and_clauses().len(), 2);
    }

    #[test]
    fn test_bad_filter_is_a_query_error() {
        let query = ResourceQuery::new().filter("price>cheap");
        assert!(matches!(query.to_query(), Err(SeekerError::InvalidExpression { .. })));
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = InMemoryProductStore::new();
        let a = store.insert(input("A", 1.0)).unwrap();
        let b = store.insert(input("B", 2.0)).unwrap();
        assert_eq!((a.product_id, b.product_id), (1, 2));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryProductStore::new();
        store.insert(input("A", 1.0)).unwrap();
        store.delete(&1).unwrap();
        let next = store.insert(input("B", 1.0)).unwrap();
        assert_eq!(next.product_id, 2);
    }

    #[test]
    fn test_parse_id() {
        let store = InMemoryProductStore::new();
        assert_eq!(store.parse_id(" 12 ").unwrap(), 12);
        assert!(matches!(store.parse_id("0"), Err(StoreError::InvalidId(_))));
        assert!(matches!(store.parse_id("abc"), Err(StoreError::InvalidId(_))));
    }

    #[test]
    fn test_validation_error_message() {
        let store = InMemoryProductStore::new();
        let err = store.insert(input("  ", -2.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid product: product_name: Product name is required; price: Price must not be negative"
        );
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_load_seed_missing_file() {
        let err = InMemoryProductStore::load_seed(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, StoreError::Seed { .. }));
    }
}
