//! The fixed record shape of the catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Column names of the durable table, in file order.
pub const COLUMNS: [&str; 6] = [
    "product_id",
    "product_name",
    "category",
    "price",
    "in_stock",
    "date_added",
];

/// Inclusive price domain.
pub const MIN_PRICE: f64 = 1.0;
pub const MAX_PRICE: f64 = 1000.0;

/// Text form of `date_added`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window (in days) that `date_added` must fall into.
pub const DATE_WINDOW_DAYS: i64 = 365;

/// One of the ten predefined catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Baby,
    Beauty,
    Fitness,
    Pet,
    Holiday,
    Kitchen,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Home,
        Category::Baby,
        Category::Beauty,
        Category::Fitness,
        Category::Pet,
        Category::Holiday,
        Category::Kitchen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Home => "Home",
            Category::Baby => "Baby",
            Category::Beauty => "Beauty",
            Category::Fitness => "Fitness",
            Category::Pet => "Pet",
            Category::Holiday => "Holiday",
            Category::Kitchen => "Kitchen",
        }
    }

    /// Comma-separated list of every label, e.g. for error messages.
    pub fn labels() -> String {
        Self::ALL
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact, case-sensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub product_id: u64,
    pub product_name: String,
    pub category: Category,
    pub price: f64,
    pub in_stock: bool,
    #[schema(value_type = String, format = Date, example = "2024-11-15")]
    pub date_added: NaiveDate,
}

/// A validated product that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub category: Category,
    pub price: f64,
    pub in_stock: bool,
    pub date_added: NaiveDate,
}

impl NewProduct {
    pub fn with_id(self, product_id: u64) -> Product {
        Product {
            product_id,
            product_name: self.product_name,
            category: self.category,
            price: self.price,
            in_stock: self.in_stock,
            date_added: self.date_added,
        }
    }
}

/// The whole table, in insertion (= file) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    rows: Vec<Product>,
}

impl Catalog {
    pub fn new(rows: Vec<Product>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Product> {
        self.rows
    }

    pub fn push(&mut self, product: Product) {
        self.rows.push(product);
    }

    /// Id the next appended row receives: current row count + 1.
    pub fn next_id(&self) -> u64 {
        self.rows.len() as u64 + 1
    }
}
