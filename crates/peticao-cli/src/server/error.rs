//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use peticao::PeticaoError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Internal server error.
    Internal(String),
    /// Error from the peticao library.
    Peticao(PeticaoError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Peticao(e) => {
                let (status, error) = match &e {
                    PeticaoError::InvalidTransition { .. } => {
                        (StatusCode::CONFLICT, "invalid_transition")
                    }
                    PeticaoError::SourceUnreadable { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "source_unreadable")
                    }
                    PeticaoError::TemplateUnreadable { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "template_unreadable")
                    }
                    PeticaoError::SubstitutionPrecondition(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "substitution_precondition")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
                };
                (status, error, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<PeticaoError> for ApiError {
    fn from(err: PeticaoError) -> Self {
        ApiError::Peticao(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Peticao(e) => write!(f, "Peticao error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
