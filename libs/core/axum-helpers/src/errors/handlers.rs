use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
