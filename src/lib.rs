pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogService, ServiceError};
pub use domain::generator::{generate, GenerateError, RowCount};
pub use domain::product::{Catalog, Category, NewProduct, Product};
pub use domain::query::{Page, Pagination, PriceRange, SortOrder};
pub use domain::validate::{validate, ProductCandidate, ValidationError};
pub use storage::{CatalogStore, SeedReport, StorageError};
