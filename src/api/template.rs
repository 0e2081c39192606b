//! Template API handlers

use crate::domain::{StringUuid, TemplateInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppContext;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Create a template owned by the caller
pub async fn create<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
    Json(input): Json<TemplateInput>,
) -> Result<impl IntoResponse> {
    let template = state.template_service().create(&auth.email, input).await?;
    Ok(Json(template))
}

/// List every template, newest first
pub async fn list_all<S: AppContext>(
    _auth: AuthUser,
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let templates = state.template_service().list_all().await?;
    Ok(Json(templates))
}

/// List the caller's own templates, newest first
pub async fn list_mine<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
) -> Result<impl IntoResponse> {
    let templates = state.template_service().list_mine(&auth.email).await?;
    Ok(Json(templates))
}

/// Get a template by id
pub async fn get<S: AppContext>(
    _auth: AuthUser,
    State(state): State<S>,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let template = state.template_service().get(id).await?;
    Ok(Json(template))
}

/// Replace a template's content (owner only)
pub async fn update<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
    Path(id): Path<StringUuid>,
    Json(input): Json<TemplateInput>,
) -> Result<impl IntoResponse> {
    let template = state
        .template_service()
        .update(&auth.email, id, input)
        .await?;
    Ok(Json(template))
}

/// Delete a template (owner only)
pub async fn delete<S: AppContext>(
    auth: AuthUser,
    State(state): State<S>,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    state.template_service().delete(&auth.email, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
