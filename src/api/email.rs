//! Email dispatch API handlers

use crate::domain::SendEmailInput;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppContext;
use axum::{extract::State, response::IntoResponse, Json};

/// Dispatch a templated email; the outcome (sent or failed) is in the body
pub async fn send<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
    Json(input): Json<SendEmailInput>,
) -> Result<impl IntoResponse> {
    let record = state.email_service().send(&auth.email, input).await?;
    Ok(Json(record))
}

/// The caller's dispatch history, most recent first
pub async fn history<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let records = state.email_service().history(&auth.email).await?;
    Ok(Json(records))
}
