//! Acceptance rules for appended products.
//!
//! Incoming JSON is first lifted into a [`ProductCandidate`], where each field is
//! tagged as missing, of the wrong JSON type, or present. The validator then
//! works on the candidate only, so "the body was not JSON" never reaches it.

use crate::domain::product::{
    Category, NewProduct, DATE_FORMAT, DATE_WINDOW_DAYS, MAX_PRICE, MIN_PRICE,
};
use chrono::{Local, NaiveDate, TimeDelta};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// One field of a candidate record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    WrongType,
    Present(T),
}

impl<T> Field<T> {
    fn present(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// A structurally parsed, not yet validated, append payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCandidate {
    pub product_name: Field<String>,
    pub category: Field<String>,
    pub price: Field<f64>,
    pub in_stock: Field<bool>,
    pub date_added: Field<String>,
}

impl ProductCandidate {
    /// Lifts a JSON value into a candidate. A non-object value yields a candidate
    /// with every field missing.
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(obj) = value.as_object() else {
            return Self {
                product_name: Field::Missing,
                category: Field::Missing,
                price: Field::Missing,
                in_stock: Field::Missing,
                date_added: Field::Missing,
            };
        };

        let string = |key: &str| match obj.get(key) {
            None => Field::Missing,
            Some(JsonValue::String(s)) => Field::Present(s.clone()),
            Some(_) => Field::WrongType,
        };

        Self {
            product_name: string("product_name"),
            category: string("category"),
            price: match obj.get("price") {
                None => Field::Missing,
                Some(v) => match v.as_f64() {
                    Some(n) => Field::Present(n),
                    None => Field::WrongType,
                },
            },
            in_stock: match obj.get("in_stock") {
                None => Field::Missing,
                Some(JsonValue::Bool(b)) => Field::Present(*b),
                Some(_) => Field::WrongType,
            },
            date_added: string("date_added"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid product_name: must be a non-empty string.")]
    InvalidProductName,
    #[error("Invalid category: must be one of [{}].", Category::labels())]
    InvalidCategory,
    #[error("Invalid price: must be between 1 and 1000.")]
    InvalidPrice,
    #[error("Invalid in_stock: must be a boolean value (true/false).")]
    InvalidInStock,
    #[error("Invalid date_added: must be in the format YYYY-MM-DD.")]
    InvalidDateFormat,
    #[error("Invalid date_added: must be within the last year.")]
    DateOutOfRange,
}

/// Validates against the local calendar date.
pub fn validate(candidate: ProductCandidate) -> Result<NewProduct, ValidationError> {
    validate_at(candidate, Local::now().date_naive())
}

/// Checks run in field order and stop at the first failure.
///
/// Dates after `today` are accepted.
pub fn validate_at(
    candidate: ProductCandidate,
    today: NaiveDate,
) -> Result<NewProduct, ValidationError> {
    let product_name = candidate
        .product_name
        .present()
        .filter(|name| !name.trim().is_empty())
        .ok_or(ValidationError::InvalidProductName)?;

    let category = candidate
        .category
        .present()
        .and_then(|label| label.parse::<Category>().ok())
        .ok_or(ValidationError::InvalidCategory)?;

    let price = candidate
        .price
        .present()
        .filter(|p| (MIN_PRICE..=MAX_PRICE).contains(p))
        .ok_or(ValidationError::InvalidPrice)?;

    let in_stock = candidate
        .in_stock
        .present()
        .ok_or(ValidationError::InvalidInStock)?;

    let raw_date = candidate
        .date_added
        .present()
        .ok_or(ValidationError::InvalidDateFormat)?;
    let date_added = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat)?;
    if date_added < earliest_accepted(today) {
        return Err(ValidationError::DateOutOfRange);
    }

    Ok(NewProduct {
        product_name,
        category,
        price,
        in_stock,
        date_added,
    })
}

/// First day of the trailing window ending at `today`.
pub fn earliest_accepted(today: NaiveDate) -> NaiveDate {
    today - TimeDelta::days(DATE_WINDOW_DAYS)
}
