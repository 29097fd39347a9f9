use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    InvalidSchema,
    InvalidSubmission,
    NotFound(String),
    /// A storage step failed after the input was accepted. `message` is the
    /// public error text; the source becomes `details`.
    Storage {
        message: &'static str,
        source: StoreError,
    },
}

impl AppError {
    pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { message, source }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidSchema => write!(f, "Invalid form schema"),
            AppError::InvalidSubmission => write!(f, "Invalid submission"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Storage { message, source } => write!(f, "{message}: {source}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidSchema => {
                (StatusCode::BAD_REQUEST, json!({ "error": "Invalid form schema" }))
            }
            AppError::InvalidSubmission => {
                (StatusCode::BAD_REQUEST, json!({ "error": "Invalid submission" }))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Storage { message, source } => {
                tracing::error!("{message}: {source}");
                let details = source.to_string();
                let details = if details.is_empty() {
                    "Unknown error".to_string()
                } else {
                    details
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "details": details }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
