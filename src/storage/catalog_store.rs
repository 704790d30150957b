//! The authoritative product table and its durable CSV mirror.
//!
//! The store never caches rows: each snapshot re-reads the file, so rows
//! appended by another writer are visible on the next read.
//!
//! Appends through one `CatalogStore` are serialized by `append_lock`, which covers
//! the whole read count -> assign id -> append -> rewrite sequence. Writers that
//! use a different handle (or process) on the same file are not covered and can
//! still race on the same id.

use crate::domain::generator::{self, RowCount};
use crate::domain::product::{Catalog, NewProduct, Product};
use crate::storage::{CsvTable, StorageResult};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Metrics from a `seed` run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub rows: usize,
    pub replaced_existing: bool,
    pub generation_time: Duration,
    pub write_time: Duration,
    pub file_size_bytes: u64,
}

impl SeedReport {
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

pub struct CatalogStore {
    table: CsvTable,
    append_lock: Mutex<()>,
}

impl CatalogStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            table: CsvTable::new(path),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.table.path()
    }

    /// Discards any existing file and replaces it with `count` generated rows.
    pub fn seed(&self, count: RowCount) -> StorageResult<SeedReport> {
        let _guard = self.lock_appends();

        let replaced_existing = self.table.remove()?;
        if replaced_existing {
            tracing::info!(path = %self.path().display(), "existing catalog file deleted");
        }

        let started = Instant::now();
        let catalog = generator::generate(count);
        let generation_time = started.elapsed();

        let started = Instant::now();
        self.table.write_all(&catalog)?;
        let write_time = started.elapsed();

        let report = SeedReport {
            rows: catalog.len(),
            replaced_existing,
            generation_time,
            write_time,
            file_size_bytes: self.table.size_bytes()?,
        };
        tracing::info!(
            rows = report.rows,
            generation_secs = format_args!("{:.2}", report.generation_time.as_secs_f64()),
            write_secs = format_args!("{:.2}", report.write_time.as_secs_f64()),
            size_mb = format_args!("{:.2}", report.file_size_mb()),
            "catalog seeded"
        );
        Ok(report)
    }

    /// Current table, freshly read from disk.
    pub fn snapshot(&self) -> StorageResult<Catalog> {
        let catalog = self.table.read_all()?;
        tracing::debug!(rows = catalog.len(), "catalog snapshot read");
        Ok(catalog)
    }

    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.snapshot()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Appends one validated product with id `row_count + 1` and rewrites the file.
    pub fn append(&self, product: NewProduct) -> StorageResult<Product> {
        let _guard = self.lock_appends();

        let mut catalog = self.table.read_all()?;
        let stored = product.with_id(catalog.next_id());
        catalog.push(stored.clone());
        self.table.write_all(&catalog)?;

        tracing::info!(
            product_id = stored.product_id,
            category = %stored.category,
            rows = catalog.len(),
            "product appended"
        );
        Ok(stored)
    }

    fn lock_appends(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.append_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
