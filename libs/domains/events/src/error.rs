//! Event domain error types

use axum_helpers::AppError;
use std::fmt;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Plain-text body of every 404 produced by the events API
pub const NOT_FOUND_MESSAGE: &str = "Event not found";

/// Event domain errors
#[derive(Debug)]
pub enum EventError {
    /// No document has this id
    NotFound { id: String },

    /// The path id is not a valid ObjectId. Reported as a server error,
    /// the same way a driver-level lookup failure is.
    InvalidId { id: String },

    /// MongoDB error
    Database {
        message: String,
        source: Option<mongodb::error::Error>,
    },

    /// JSON <-> BSON conversion error
    Serialization { message: String },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Event not found: {}", id),
            Self::InvalidId { id } => write!(f, "Invalid ObjectId: {}", id),
            Self::Database { message, .. } => write!(f, "Database error: {}", message),
            Self::Serialization { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database {
                source: Some(e), ..
            } => Some(e),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { .. } => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
