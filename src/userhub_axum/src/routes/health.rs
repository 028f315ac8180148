use axum::http::StatusCode;

/// Liveness probe.
pub async fn start() -> StatusCode {
    StatusCode::NO_CONTENT
}
