//! Synthetic catalog generation.

use crate::domain::product::{Catalog, Category, Product, MAX_PRICE, MIN_PRICE};
use chrono::{Local, NaiveDate, TimeDelta};
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Probability that a generated product is in stock.
pub const IN_STOCK_PROBABILITY: f64 = 0.85;

/// Number of distinct days `date_added` is drawn from, ending today.
pub const GENERATED_DATE_SPAN_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested count is not an integer at all.
    #[error("row count must be an integer, got '{0}'")]
    NotAnInteger(String),
    #[error("row count must be non-negative, got {0}")]
    Negative(i64),
}

/// A validated, non-negative number of rows to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowCount(u64);

impl RowCount {
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for RowCount {
    type Error = GenerateError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        u64::try_from(n)
            .map(RowCount)
            .map_err(|_| GenerateError::Negative(n))
    }
}

impl FromStr for RowCount {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .replace('_', "")
            .parse()
            .map_err(|_| GenerateError::NotAnInteger(s.to_string()))?;
        RowCount::try_from(n)
    }
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates `count` rows dated relative to the local calendar date.
pub fn generate(count: RowCount) -> Catalog {
    generate_with(count, Local::now().date_naive(), &mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(count: RowCount, today: NaiveDate, rng: &mut R) -> Catalog {
    let rows = (1..=count.get())
        .map(|product_id| Product {
            product_id,
            product_name: product_name(rng),
            category: Category::ALL[rng.gen_range(0..Category::ALL.len())],
            price: round_cents(rng.gen_range(MIN_PRICE..=MAX_PRICE)),
            in_stock: rng.gen_bool(IN_STOCK_PROBABILITY),
            date_added: today - TimeDelta::days(rng.gen_range(0..GENERATED_DATE_SPAN_DAYS)),
        })
        .collect();
    Catalog::new(rows)
}

fn product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word: String = Word().fake_with_rng(rng);
    capitalize(&word)
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
