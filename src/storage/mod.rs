pub mod catalog_store;
pub mod csv_table;

pub use catalog_store::{CatalogStore, SeedReport};
pub use csv_table::CsvTable;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog file {0} does not exist (was the catalog seeded?)")]
    NotFound(PathBuf),
    #[error("unexpected header in {path}: {found}")]
    Header { path: PathBuf, found: String },
    #[error("corrupt row {row}: {reason}")]
    Corrupt { row: usize, reason: String },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
