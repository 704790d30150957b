//! The durable table: one CSV file with a fixed header.

use crate::domain::product::{Catalog, Category, Product, COLUMNS, DATE_FORMAT};
use crate::storage::{StorageError, StorageResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Row shape as written: booleans as `True`/`False`, dates as `YYYY-MM-DD`.
#[derive(Serialize)]
struct CsvRow<'a> {
    product_id: u64,
    product_name: &'a str,
    category: &'static str,
    price: f64,
    in_stock: &'static str,
    date_added: String,
}

impl<'a> From<&'a Product> for CsvRow<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            product_id: p.product_id,
            product_name: &p.product_name,
            category: p.category.as_str(),
            price: p.price,
            in_stock: if p.in_stock { "True" } else { "False" },
            date_added: p.date_added.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Row shape as read. Text columns are converted by hand so errors carry the row number.
#[derive(Deserialize)]
struct CsvRecord {
    product_id: u64,
    product_name: String,
    category: String,
    price: f64,
    in_stock: String,
    date_added: String,
}

impl CsvRecord {
    fn into_product(self, row: usize) -> StorageResult<Product> {
        let corrupt = |reason: String| StorageError::Corrupt { row, reason };

        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| corrupt(e.to_string()))?;
        let in_stock = match self.in_stock.as_str() {
            "True" | "true" => true,
            "False" | "false" => false,
            other => return Err(corrupt(format!("in_stock is not a boolean: '{}'", other))),
        };
        let date_added = NaiveDate::parse_from_str(&self.date_added, DATE_FORMAT)
            .map_err(|e| corrupt(format!("date_added '{}': {}", self.date_added, e)))?;

        Ok(Product {
            product_id: self.product_id,
            product_name: self.product_name,
            category,
            price: self.price,
            in_stock,
            date_added,
        })
    }
}

/// File-backed table. Every read parses the whole file; every write replaces it.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> StorageResult<Catalog> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.clone()))
            }
            Err(err) => return Err(StorageError::Io(err)),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        if !headers.iter().eq(COLUMNS.iter().copied()) {
            return Err(StorageError::Header {
                path: self.path.clone(),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut catalog = Catalog::default();
        for record in reader.records() {
            let record = record?;
            // 1-based line the record starts on; quoted fields may span lines.
            let row = record
                .position()
                .and_then(|pos| usize::try_from(pos.line()).ok())
                .unwrap_or(0);
            let parsed: CsvRecord = record
                .deserialize(Some(&headers))
                .map_err(|e| StorageError::Corrupt {
                    row,
                    reason: e.to_string(),
                })?;
            catalog.push(parsed.into_product(row)?);
        }
        Ok(catalog)
    }

    /// Replaces the file with `catalog`. The rows go to a sibling temp file first,
    /// which is then renamed over the target.
    pub fn write_all(&self, catalog: &Catalog) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let written = write_rows(&tmp, catalog)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(StorageError::from));
        if written.is_err() {
            if let Err(err) = fs::remove_file(&tmp) {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %err, "could not remove temp file");
                }
            }
        }
        written
    }

    /// Deletes the file. Returns whether there was one.
    pub fn remove(&self) -> StorageResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    pub fn size_bytes(&self) -> StorageResult<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// Unique per write, so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.path.with_file_name(name)
    }
}

fn write_rows(path: &Path, catalog: &Catalog) -> StorageResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(File::create(path)?));
    writer.write_record(COLUMNS)?;
    for product in catalog.rows() {
        writer.serialize(CsvRow::from(product))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str, in_stock: bool) -> Product {
        Product {
            product_id: id,
            product_name: name.to_string(),
            category: Category::Kitchen,
            price: 19.5,
            in_stock,
            date_added: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
        }
    }

    #[test]
    fn writes_header_and_python_style_booleans() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        let catalog = Catalog::new(vec![product(1, "Kettle", true), product(2, "Pan", false)]);
        table.write_all(&catalog).unwrap();

        let text = fs::read_to_string(table.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "product_id,product_name,category,price,in_stock,date_added");
        assert_eq!(lines[1], "1,Kettle,Kitchen,19.5,True,2024-11-15");
        assert_eq!(lines[2], "2,Pan,Kitchen,19.5,False,2024-11-15");
        assert_eq!(lines.len(), 3);

        assert_eq!(table.read_all().unwrap(), catalog);
    }

    #[test]
    fn empty_catalog_keeps_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        table.write_all(&Catalog::default()).unwrap();

        let text = fs::read_to_string(table.path()).unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
        assert!(table.read_all().unwrap().is_empty());
    }

    #[test]
    fn names_with_delimiters_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        let catalog = Catalog::new(vec![product(1, "Pots, \"deluxe\" set", true)]);
        table.write_all(&catalog).unwrap();
        assert_eq!(table.read_all().unwrap(), catalog);
    }

    #[test]
    fn missing_file_and_bad_header_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        assert!(matches!(table.read_all(), Err(StorageError::NotFound(_))));

        fs::write(table.path(), "id,name\n1,x\n").unwrap();
        assert!(matches!(table.read_all(), Err(StorageError::Header { .. })));
    }

    #[test]
    fn corrupt_rows_carry_their_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        let body = format!(
            "{}\n1,Kettle,Kitchen,19.5,True,2024-11-15\n2,Pan,Garage,19.5,True,2024-11-15\n",
            COLUMNS.join(",")
        );
        fs::write(table.path(), body).unwrap();
        match table.read_all() {
            Err(StorageError::Corrupt { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected corrupt row error, got {:?}", other),
        }
    }

    #[test]
    fn remove_reports_whether_a_file_existed() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("nested/products.csv"));
        assert!(!table.remove().unwrap());
        table.write_all(&Catalog::default()).unwrap();
        assert!(table.path().exists());
        assert!(table.remove().unwrap());
        assert!(!table.path().exists());
    }

    #[test]
    fn corrupt_row_numbers_follow_multiline_names() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("products.csv"));
        let body = format!(
            "{}\n1,\"Two\nLines\",Kitchen,19.5,True,2024-11-15\n2,Pan,Kitchen,19.5,maybe,2024-11-15\n",
            COLUMNS.join(",")
        );
        fs::write(table.path(), body).unwrap();
        match table.read_all() {
            Err(StorageError::Corrupt { row, .. }) => assert_eq!(row, 4),
            other => panic!("expected corrupt row error, got {:?}", other),
        }

        let body = format!("{}\n1,Kettle,Kitchen,cheap,True,2024-11-15\n", COLUMNS.join(","));
        fs::write(table.path(), body).unwrap();
        match table.read_all() {
            Err(StorageError::Corrupt { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected corrupt row error, got {:?}", other),
        }
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the final rename fail.
        let target = dir.path().join("products.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let table = CsvTable::new(&target);
        assert!(table.write_all(&Catalog::new(vec![product(1, "Kettle", true)])).is_err());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }
}
