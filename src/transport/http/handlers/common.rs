use crate::app::catalog_service::ServiceError;
use crate::domain::query::Pagination;
use crate::transport::http::types::{ErrorBody, DEFAULT_PAGE};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Validation failures are the caller's fault (400); everything else is ours (500).
pub fn service_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        other => {
            tracing::error!(error = %other, "catalog operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

pub fn query_400(err: QueryRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid query string: {}", err.body_text()),
    )
}

pub fn json_422(err: JsonRejection, expected: &str) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Invalid JSON body: {} (expected: {})", err.body_text(), expected),
    )
}

/// Fills in route defaults. Values are passed through unchecked.
pub fn pagination(page: Option<i64>, per_page: Option<i64>, default_per_page: i64) -> Pagination {
    Pagination::new(
        page.unwrap_or(DEFAULT_PAGE),
        per_page.unwrap_or(default_per_page),
    )
}
