//! Error handling for the Agritech Hub server
//!
//! Every failure is rendered as `{ "error": <message>, "code": <CODE> }`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Incomplete upstream data: {0}")]
    IncompleteUpstreamData(String),

    // Classifier errors
    #[error("Model error: {0}")]
    Model(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::WeatherServiceUnavailable => {
                (StatusCode::BAD_GATEWAY, "WEATHER_SERVICE_UNAVAILABLE")
            }
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            AppError::IncompleteUpstreamData(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INCOMPLETE_UPSTREAM_DATA")
            }
            AppError::Model(_) => (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_ERROR"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) | AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    /// Client-facing message; storage and internal details are not exposed
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(resource) => format!("{} not found", resource),
            AppError::WeatherServiceUnavailable => "Failed to fetch weather data".to_string(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::IncompleteUpstreamData(msg) => msg.clone(),
            AppError::Model(msg) => msg.clone(),
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Internal(_) | AppError::InternalError(_) => {
                "Internal Server Error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            error: self.public_message(),
            code: code.to_string(),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Body for panics caught by the router; details stay in the log
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Post".into()), StatusCode::NOT_FOUND),
            (AppError::WeatherServiceUnavailable, StatusCode::BAD_GATEWAY),
            (AppError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::IncompleteUpstreamData("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Model("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_and_code().0, status);
        }
    }

    #[test]
    fn test_internal_details_hidden() {
        let error = AppError::Internal("connection string leaked".into());
        assert_eq!(error.public_message(), "Internal Server Error");

        let error = AppError::NotFound("Post".into());
        assert_eq!(error.public_message(), "Post not found");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::Validation("Location is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Location is required");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_panic_response_is_generic_json() {
        let response = panic_response(Box::new("index out of bounds".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Internal Server Error");
        assert_eq!(json["code"], "INTERNAL_ERROR");
    }
}
