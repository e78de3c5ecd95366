use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::loader::LoadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unprocessable document: {0}")]
    CorruptDocument(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::UnsupportedMediaType(_) => AppError::UnsupportedMediaType(err.to_string()),
            LoadError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            LoadError::CorruptDocument(_) => AppError::CorruptDocument(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::CorruptDocument(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CORRUPT_DOCUMENT",
                msg.clone(),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "PARSE_TIMEOUT",
                "Document parsing exceeded the time budget".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::extraction::loader::{MediaType, RawDocument};

    #[test]
    fn test_load_error_maps_to_http_variants() {
        let too_large = RawDocument::new(Bytes::from_static(b"abc"), MediaType::Txt, 1)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(
            AppError::from(too_large),
            AppError::PayloadTooLarge(_)
        ));

        let corrupt = LoadError::CorruptDocument("bad pdf".to_string());
        assert!(matches!(
            AppError::from(corrupt),
            AppError::CorruptDocument(_)
        ));
    }
}
