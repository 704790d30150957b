use crate::transport::http::types::{AppState, HealthStatus};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (catalog file readable)", body = HealthStatus),
        (status = 503, description = "Service is unhealthy (catalog file unreadable)", body = HealthStatus)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.row_count().await {
        Ok(rows) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok".to_string(),
                rows: Some(rows),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unhealthy".to_string(),
                    rows: None,
                }),
            )
                .into_response()
        }
    }
}
