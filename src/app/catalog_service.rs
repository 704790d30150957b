//! The catalog service.
//!
//! This module sits between the HTTP handlers and the catalog store. It is
//! responsible for:
//! 1.  Taking a fresh snapshot per query and running the query engine on it.
//! 2.  Lifting append payloads into candidates, validating them, and appending.
//! 3.  Keeping blocking file I/O off the async worker threads.

use crate::domain::generator::RowCount;
use crate::domain::product::{Catalog, Product};
use crate::domain::query::{self, Page, Pagination, PriceRange, SortOrder};
use crate::domain::validate::{self, ProductCandidate, ValidationError};
use crate::storage::{CatalogStore, SeedReport, StorageError};
use serde_json::Value as JsonValue;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Cheap to clone; clones share the same store (and its append lock).
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<CatalogStore>,
}

impl CatalogService {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub async fn seed(&self, count: RowCount) -> ServiceResult<SeedReport> {
        self.blocking(move |store| store.seed(count)).await
    }

    pub async fn row_count(&self) -> ServiceResult<usize> {
        self.blocking(|store| store.len()).await
    }

    pub async fn filter_by_category(
        &self,
        category: Option<String>,
        pagination: Pagination,
    ) -> ServiceResult<Page<Product>> {
        self.query(move |catalog| {
            let rows = query::filter_by_category(catalog.into_rows(), category.as_deref());
            query::paginate(rows, pagination)
        })
        .await
    }

    pub async fn filter_by_price(
        &self,
        range: PriceRange,
        pagination: Pagination,
    ) -> ServiceResult<Page<Product>> {
        self.query(move |catalog| {
            query::paginate(query::filter_by_price(catalog.into_rows(), range), pagination)
        })
        .await
    }

    pub async fn count_in_stock(&self) -> ServiceResult<usize> {
        self.query(|catalog| query::count_in_stock(catalog.rows()))
            .await
    }

    pub async fn sort_by_price(
        &self,
        order: SortOrder,
        pagination: Pagination,
    ) -> ServiceResult<Page<Product>> {
        self.query(move |catalog| {
            query::paginate(query::sort_by_price(catalog.into_rows(), order), pagination)
        })
        .await
    }

    pub async fn top_recent(&self, limit: usize) -> ServiceResult<Vec<Product>> {
        self.query(move |catalog| query::top_recent(catalog.into_rows(), limit))
            .await
    }

    /// Validates `payload` and appends it. A rejected payload leaves the store untouched.
    pub async fn add_product(&self, payload: &JsonValue) -> ServiceResult<Product> {
        let product = validate::validate(ProductCandidate::from_json(payload))?;
        self.blocking(move |store| store.append(product)).await
    }

    async fn query<T, F>(&self, f: F) -> ServiceResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Catalog) -> T + Send + 'static,
    {
        self.blocking(move |store| store.snapshot().map(f)).await
    }

    async fn blocking<T, F>(&self, f: F) -> ServiceResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&CatalogStore) -> Result<T, StorageError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        Ok(tokio::task::spawn_blocking(move || f(&store)).await??)
    }
}
