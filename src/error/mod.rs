//! Unified error handling for Mensageiro Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Missing entities surface as 400 with a message naming the entity.
        // 404 is reserved for the current-profile lookup.
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "jwt_error",
                    "Invalid or expired token".to_string(),
                )
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hash error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

// Conversion from validation errors: all field messages joined into one line
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("{}: {}", field, error.code)),
                }
            }
        }
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_display() {
        let err = AppError::BadRequest("Template não encontrado".to_string());
        assert_eq!(err.to_string(), "Bad request: Template não encontrado");
    }

    #[test]
    fn test_error_conversion() {
        let err: AppError = anyhow::anyhow!("Something went wrong").into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (
                AppError::BadRequest("x".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("x".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Unauthorized("x".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("x".into()).into_response().status(),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::Validation("x".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (got, expected) in cases {
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_validation_errors_joined() {
        use validator::Validate;

        #[derive(Validate)]
        struct Input {
            #[validate(length(min = 1, message = "Nome é obrigatório"))]
            name: String,
            #[validate(email(message = "E-mail inválido"))]
            email: String,
        }

        let input = Input {
            name: String::new(),
            email: "not-an-email".to_string(),
        };
        let err: AppError = input.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("Nome é obrigatório"));
                assert!(msg.contains("E-mail inválido"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
