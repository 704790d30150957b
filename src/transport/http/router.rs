use crate::domain::product::{Category, Product};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::types::{
    ErrorBody, HealthStatus, InStockCount, NewProductRequest, ProductCreated, ProductPage,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::filter_products_handler,
        products::filter_by_price_handler,
        products::count_in_stock_handler,
        products::sort_products_handler,
        products::top_recent_handler,
        products::add_product_handler
    ),
    components(schemas(
        Product,
        Category,
        ProductPage,
        InStockCount,
        NewProductRequest,
        ProductCreated,
        HealthStatus,
        ErrorBody
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/filter_products", get(products::filter_products_handler))
        .route("/products", post(products::add_product_handler))
        .route("/products/price", get(products::filter_by_price_handler))
        .route("/products/in_stock", get(products::count_in_stock_handler))
        .route("/products/sort", get(products::sort_products_handler))
        .route("/products/recent", get(products::top_recent_handler))
        .with_state(app_state)
}
