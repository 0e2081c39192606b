//! JWT authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::state::AppContext;

/// Authenticated user information extracted from the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Email from the token's `sub` claim
    pub email: String,
    /// Display name from the token
    pub name: String,
}

/// Authentication errors. All of them answer 401 without detail.
#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidHeader,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidHeader => "Invalid authorization header",
            AuthError::InvalidToken => "Invalid token",
        };

        let body = serde_json::json!({
            "error": "unauthorized",
            "message": message,
        });

        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Extract and validate the Bearer token from the Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeader)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: AppContext + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let claims = state
            .jwt_manager()
            .verify_token(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            email: claims.sub,
            name: claims.name,
        })
    }
}
