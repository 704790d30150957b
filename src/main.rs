//! Seeding entrypoint.
//!
//! Regenerates the catalog file and exits, for when the table should be prepared
//! ahead of time (the API server seeds on its own at startup).
//!
//! Row count and path come from `CATALOG_SEED_ROWS` / `CATALOG_PATH`; a single
//! positional argument overrides the row count.

use anyhow::Context;
use product_catalog::infra::{config, logging};
use product_catalog::{CatalogStore, RowCount};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging()?;

    let rows = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<RowCount>()
            .with_context(|| format!("invalid row count argument '{}'", arg))?,
        None => config::seed_rows()?,
    };
    let path = config::catalog_path();

    let store = CatalogStore::new(&path);
    let report = store
        .seed(rows)
        .with_context(|| format!("failed to seed {}", path.display()))?;

    println!("> Catalog written to {}", path.display());
    println!("  rows:            {}", report.rows);
    println!("  generation time: {:.2} s", report.generation_time.as_secs_f64());
    println!("  file write time: {:.2} s", report.write_time.as_secs_f64());
    println!("  file size:       {:.2} MB", report.file_size_mb());
    Ok(())
}
