//! Authentication API handlers

use crate::domain::{LoginInput, RegisterInput};
use crate::error::Result;
use crate::state::AppContext;
use axum::{extract::State, response::IntoResponse, Json};

/// Register a new user and return a token plus profile
pub async fn register<S: AppContext>(
    State(state): State<S>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let response = state.auth_service().register(input).await?;
    Ok(Json(response))
}

/// Authenticate and return a token plus profile
pub async fn login<S: AppContext>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let response = state.auth_service().login(input).await?;
    Ok(Json(response))
}
