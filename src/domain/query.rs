//! Stateless transformations over a catalog snapshot.
//!
//! Every operation consumes the rows it is given; callers hand in a fresh
//! snapshot per request.

use crate::domain::product::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of rows `top_recent` returns by default.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Caller-supplied pagination. Not validated: non-positive or huge values
/// yield empty or degenerate pages rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub const fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// `ceil(total / per_page)`, or 0 when `per_page` is not positive.
    pub fn total_pages(&self, total: usize) -> i64 {
        if self.per_page <= 0 {
            return 0;
        }
        let total = i64::try_from(total).unwrap_or(i64::MAX);
        total / self.per_page + i64::from(total % self.per_page != 0)
    }

    /// Half-open row range `[(page-1)*per_page, page*per_page)` clipped to `total`.
    pub fn bounds(&self, total: usize) -> std::ops::Range<usize> {
        if self.page <= 0 || self.per_page <= 0 {
            return 0..0;
        }
        let start = (self.page - 1).saturating_mul(self.per_page);
        let end = start.saturating_add(self.per_page);
        let clip = |i: i64| usize::try_from(i).map_or(total, |i| i.min(total));
        clip(start)..clip(end)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: i64,
    /// Row count before pagination.
    pub total: usize,
    pub total_pages: i64,
    #[serde(rename = "products")]
    pub items: Vec<T>,
}

pub fn paginate<T>(rows: Vec<T>, pagination: Pagination) -> Page<T> {
    let total = rows.len();
    let range = pagination.bounds(total);
    let items = rows
        .into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect();
    Page {
        page: pagination.page,
        per_page: pagination.per_page,
        total,
        total_pages: pagination.total_pages(total),
        items,
    }
}

/// Exact match on the category label. `None` and the empty string keep every row.
pub fn filter_by_category(rows: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category {
        Some(label) if !label.is_empty() => rows
            .into_iter()
            .filter(|p| p.category.as_str() == label)
            .collect(),
        _ => rows,
    }
}

/// Inclusive price range; an omitted bound is open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min.unwrap_or(0.0) && price <= self.max.unwrap_or(f64::INFINITY)
    }
}

pub fn filter_by_price(rows: Vec<Product>, range: PriceRange) -> Vec<Product> {
    rows.into_iter().filter(|p| range.contains(p.price)).collect()
}

pub fn count_in_stock(rows: &[Product]) -> usize {
    rows.iter().filter(|p| p.in_stock).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Exactly `"asc"` sorts ascending; every other value sorts descending.
    pub fn parse(order: &str) -> Self {
        if order == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// Stable sort on price.
pub fn sort_by_price(mut rows: Vec<Product>, order: SortOrder) -> Vec<Product> {
    rows.sort_by(|a, b| {
        let ord = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    rows
}

/// Newest `limit` rows by `date_added`, ties kept in file order.
pub fn top_recent(mut rows: Vec<Product>, limit: usize) -> Vec<Product> {
    rows.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Category;
    use chrono::NaiveDate;

    fn product(id: u64, category: Category, price: f64, in_stock: bool, day: u32) -> Product {
        Product {
            product_id: id,
            product_name: format!("Item{id}"),
            category,
            price,
            in_stock,
            date_added: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
        }
    }

    fn rows() -> Vec<Product> {
        vec![
            product(1, Category::Electronics, 10.0, true, 3),
            product(2, Category::Books, 100.0, false, 9),
            product(3, Category::Electronics, 9.99, true, 1),
            product(4, Category::Pet, 100.01, true, 9),
            product(5, Category::Books, 55.5, false, 20),
            product(6, Category::Electronics, 55.5, true, 14),
        ]
    }

    fn ids(rows: &[Product]) -> Vec<u64> {
        rows.iter().map(|p| p.product_id).collect()
    }

    #[test]
    fn pagination_arithmetic() {
        let numbers: Vec<u32> = (0..23).collect();
        let page = paginate(numbers.clone(), Pagination::new(3, 10));
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![20, 21, 22]);

        let page = paginate(numbers.clone(), Pagination::new(1, 10));
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());

        let page = paginate(numbers, Pagination::new(4, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn degenerate_pagination_is_not_an_error() {
        let numbers: Vec<u32> = (0..5).collect();

        let page = paginate(numbers.clone(), Pagination::new(0, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);

        let page = paginate(numbers.clone(), Pagination::new(1, 0));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);

        let page = paginate(numbers.clone(), Pagination::new(1, i64::MAX));
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 1);

        let page = paginate(numbers, Pagination::new(i64::MAX, i64::MAX));
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_serializes_items_as_products() {
        let page = paginate(vec![1, 2], Pagination::new(1, 10));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["products"], serde_json::json!([1, 2]));
        assert_eq!(json["total_pages"], 1);
    }

    #[test]
    fn category_filter_is_exact() {
        let filtered = filter_by_category(rows(), Some("Electronics"));
        assert_eq!(ids(&filtered), vec![1, 3, 6]);
        assert!(filter_by_category(rows(), Some("electronics")).is_empty());
        assert_eq!(filter_by_category(rows(), None).len(), 6);
        assert_eq!(filter_by_category(rows(), Some("")).len(), 6);
    }

    #[test]
    fn price_filter_is_inclusive() {
        let range = PriceRange {
            min: Some(10.0),
            max: Some(100.0),
        };
        assert_eq!(ids(&filter_by_price(rows(), range)), vec![1, 2, 5, 6]);
        assert_eq!(filter_by_price(rows(), PriceRange::default()).len(), 6);
        let above = PriceRange {
            min: Some(100.0),
            max: None,
        };
        assert_eq!(ids(&filter_by_price(rows(), above)), vec![2, 4]);
    }

    #[test]
    fn counts_in_stock_rows() {
        assert_eq!(count_in_stock(&rows()), 4);
        assert_eq!(count_in_stock(&[]), 0);
    }

    #[test]
    fn sort_order_is_binary() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Desc);
    }

    #[test]
    fn price_sort_is_stable_in_both_directions() {
        let asc = sort_by_price(rows(), SortOrder::Asc);
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(ids(&asc), vec![3, 1, 5, 6, 2, 4]);

        let desc = sort_by_price(rows(), SortOrder::Desc);
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
        assert_eq!(ids(&desc), vec![4, 2, 5, 6, 1, 3]);
    }

    #[test]
    fn top_recent_orders_by_date_descending() {
        let recent = top_recent(rows(), DEFAULT_RECENT_LIMIT);
        assert_eq!(ids(&recent), vec![5, 6, 2, 4, 1, 3]);
        assert_eq!(top_recent(rows(), 2).len(), 2);

        let many: Vec<Product> = (1..=25)
            .map(|i| product(i, Category::Home, 5.0, true, (i % 28 + 1) as u32))
            .collect();
        let recent = top_recent(many, DEFAULT_RECENT_LIMIT);
        assert_eq!(recent.len(), 10);
        assert!(recent.windows(2).all(|w| w[0].date_added >= w[1].date_added));
    }
}
