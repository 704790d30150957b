//! Catalog domain: record shape, generation, validation and queries.

pub mod generator;
pub mod product;
pub mod query;
pub mod validate;
