//! Centralized configuration (environment variables + defaults).

use crate::domain::generator::RowCount;
use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "products.csv";
pub const DEFAULT_SEED_ROWS: RowCount = RowCount::new(1_000_000);
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PERF_ROWS: RowCount = RowCount::new(1_005_000);

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Path of the durable catalog file.
pub fn catalog_path() -> PathBuf {
    var("CATALOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}

/// Number of rows generated at startup.
pub fn seed_rows() -> anyhow::Result<RowCount> {
    row_count("CATALOG_SEED_ROWS", DEFAULT_SEED_ROWS)
}

/// Address the API server listens on.
pub fn bind_addr() -> anyhow::Result<SocketAddr> {
    let raw = var("CATALOG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    raw.parse()
        .with_context(|| format!("CATALOG_BIND_ADDR must be a socket address, got '{}'", raw))
}

/// Table size for the performance binary.
pub fn perf_rows() -> anyhow::Result<RowCount> {
    row_count("CATALOG_PERF_ROWS", DEFAULT_PERF_ROWS)
}

fn row_count(name: &str, default: RowCount) -> anyhow::Result<RowCount> {
    match var(name) {
        Some(raw) => raw
            .parse::<RowCount>()
            .with_context(|| format!("{} must be a non-negative integer", name)),
        None => Ok(default),
    }
}

/// Everything the API server needs at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub seed_rows: RowCount,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            catalog_path: catalog_path(),
            seed_rows: seed_rows()?,
            bind_addr: bind_addr()?,
        })
    }
}
