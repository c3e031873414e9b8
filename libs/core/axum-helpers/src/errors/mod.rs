pub mod handlers;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body sent with every 500 response. Details stay in the logs.
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

/// Application error type that can be converted to HTTP responses.
///
/// Responses carry plain-text bodies, never structured payloads:
/// - `NotFound(msg)` → `404` with `msg` as the body
/// - `InternalServerError(msg)` → `500` with [`INTERNAL_SERVER_ERROR_BODY`]
/// - `JsonExtractorRejection` → the rejection's own status and text
///
/// Domain crates convert their own error enums into this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error(transparent)]
    JsonExtractorRejection(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg).into_response()
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_BODY).into_response()
            }
            AppError::JsonExtractorRejection(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                (rejection.status(), rejection.body_text()).into_response()
            }
        }
    }
}
