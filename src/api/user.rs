//! User API handlers

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppContext;
use axum::{extract::State, response::IntoResponse, Json};

/// Current user's profile
pub async fn me<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service().me(&auth.email).await?;
    Ok(Json(profile))
}

/// All registered users except the caller
pub async fn list<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let users = state.user_service().list_others(&auth.email).await?;
    Ok(Json(users))
}
