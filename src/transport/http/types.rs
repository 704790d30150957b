use crate::app::catalog_service::CatalogService;
use crate::domain::product::Product;
use crate::domain::query::Page;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// Defaults per route, as the listing endpoints have always shipped them.
pub const DEFAULT_PAGE: i64 = 1;
pub const CATEGORY_PER_PAGE: i64 = 10;
pub const PRICE_PER_PAGE: i64 = 100;
pub const SORT_PER_PAGE: i64 = 5;

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Exact category label. Omitted or empty lists every product.
    pub category: Option<String>,
    /// 1-based page number (default 1).
    #[serde(default, deserialize_with = "saturating_i64")]
    pub page: Option<i64>,
    /// Page size (default 10).
    #[serde(default, deserialize_with = "saturating_i64")]
    pub per_page: Option<i64>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Inclusive lower bound (default 0).
    pub min_price: Option<f64>,
    /// Inclusive upper bound (default unbounded).
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub page: Option<i64>,
    /// Page size (default 100).
    #[serde(default, deserialize_with = "saturating_i64")]
    pub per_page: Option<i64>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// `asc` sorts ascending; any other value sorts descending.
    pub order: Option<String>,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub page: Option<i64>,
    /// Page size (default 5).
    #[serde(default, deserialize_with = "saturating_i64")]
    pub per_page: Option<i64>,
}

/// Integer query values. Anything past the `i64` range saturates, so an
/// oversized `page` or `per_page` gives a degenerate page instead of a 400.
fn saturating_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_saturating(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid integer `{}`", raw)))
}

fn parse_saturating(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// A page of products.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductPage {
    pub page: i64,
    pub per_page: i64,
    /// Matching rows before pagination.
    pub total: usize,
    pub total_pages: i64,
    pub products: Vec<Product>,
}

impl From<Page<Product>> for ProductPage {
    fn from(page: Page<Product>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
            products: page.items,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InStockCount {
    pub in_stock_count: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductCreated {
    pub message: String,
    pub product: Product,
}

/// Body of a new product. Fields are checked by the server, in this order.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[allow(dead_code)]
pub struct NewProductRequest {
    #[schema(example = "Test Product")]
    pub product_name: String,
    #[schema(example = "Clothing")]
    pub category: String,
    #[schema(example = 99.99)]
    pub price: f64,
    pub in_stock: bool,
    #[schema(example = "2024-11-15")]
    pub date_added: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
