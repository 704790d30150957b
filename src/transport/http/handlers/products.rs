use crate::domain::product::Product;
use crate::domain::query::{PriceRange, SortOrder, DEFAULT_RECENT_LIMIT};
use crate::transport::http::handlers::common::{
    json_422, pagination, query_400, service_error_response,
};
use crate::transport::http::types::{
    AppState, CategoryQuery, ErrorBody, InStockCount, NewProductRequest, PriceQuery,
    ProductCreated, ProductPage, SortQuery, CATEGORY_PER_PAGE, PRICE_PER_PAGE, SORT_PER_PAGE,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/filter_products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Products in the category, paginated", body = ProductPage),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 500, description = "Catalog could not be read", body = ErrorBody)
    )
)]
pub async fn filter_products_handler(
    State(state): State<AppState>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return query_400(e),
    };
    let page = pagination(query.page, query.per_page, CATEGORY_PER_PAGE);

    match state.catalog.filter_by_category(query.category, page).await {
        Ok(result) => (StatusCode::OK, Json(ProductPage::from(result))).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/price",
    params(PriceQuery),
    responses(
        (status = 200, description = "Products within the inclusive price range, paginated", body = ProductPage),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 500, description = "Catalog could not be read", body = ErrorBody)
    )
)]
pub async fn filter_by_price_handler(
    State(state): State<AppState>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return query_400(e),
    };
    let range = PriceRange {
        min: query.min_price,
        max: query.max_price,
    };
    let page = pagination(query.page, query.per_page, PRICE_PER_PAGE);

    match state.catalog.filter_by_price(range, page).await {
        Ok(result) => (StatusCode::OK, Json(ProductPage::from(result))).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/in_stock",
    responses(
        (status = 200, description = "Number of products in stock", body = InStockCount),
        (status = 500, description = "Catalog could not be read", body = ErrorBody)
    )
)]
pub async fn count_in_stock_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.count_in_stock().await {
        Ok(in_stock_count) => (StatusCode::OK, Json(InStockCount { in_stock_count })).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "All products sorted by price, paginated", body = ProductPage),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 500, description = "Catalog could not be read", body = ErrorBody)
    )
)]
pub async fn sort_products_handler(
    State(state): State<AppState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return query_400(e),
    };
    let order = query
        .order
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();
    let page = pagination(query.page, query.per_page, SORT_PER_PAGE);

    match state.catalog.sort_by_price(order, page).await {
        Ok(result) => (StatusCode::OK, Json(ProductPage::from(result))).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/recent",
    responses(
        (status = 200, description = "The 10 most recently added products, newest first", body = [Product]),
        (status = 500, description = "Catalog could not be read", body = ErrorBody)
    )
)]
pub async fn top_recent_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.top_recent(DEFAULT_RECENT_LIMIT).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => service_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = NewProductRequest,
    responses(
        (status = 201, description = "Product appended with the next id", body = ProductCreated),
        (status = 400, description = "Product failed validation", body = ErrorBody),
        (status = 422, description = "Body is not valid JSON", body = ErrorBody),
        (status = 500, description = "Catalog could not be read or written", body = ErrorBody)
    )
)]
pub async fn add_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, "a JSON product object"),
    };

    match state.catalog.add_product(&payload).await {
        Ok(product) => (
            StatusCode::CREATED,
            Json(ProductCreated {
                message: "Product added successfully".to_string(),
                product,
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e),
    }
}
