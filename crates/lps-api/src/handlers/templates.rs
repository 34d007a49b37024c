//! Template API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lps_core::constants::DEFAULT_RECORD_STATUS;
use lps_core::models::{Template, TemplateInput};
use lps_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::page_window;
use super::workflows::PreviewResponse;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Body for registering or editing a template
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TemplateRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Absolute, or relative to the project root, repository root, or templates root
    #[validate(length(min = 1))]
    pub html_file_path: String,
    #[validate(range(min = 1))]
    pub max_videos: i32,
    pub static_assets_path: Option<String>,
    pub status: Option<String>,
}

impl From<TemplateRequest> for TemplateInput {
    fn from(req: TemplateRequest) -> Self {
        TemplateInput {
            name: req.name,
            description: req.description,
            thumbnail_url: req.thumbnail_url,
            html_file_path: req.html_file_path,
            max_videos: req.max_videos,
            static_assets_path: req.static_assets_path,
            status: req
                .status
                .unwrap_or_else(|| DEFAULT_RECORD_STATUS.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTemplatesQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateListResponse {
    pub total: i64,
    pub items: Vec<Template>,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Template {} not found", id))
}

#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "templates",
    params(ListTemplatesQuery),
    responses(
        (status = 200, description = "Page of templates", body = TemplateListResponse),
        (status = 400, description = "Invalid paging", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListTemplatesQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = page_window(q.page, q.page_size)?;
    let (items, total) = state
        .db
        .template_repository
        .list(q.status.as_deref(), limit, offset)
        .await?;
    Ok(Json(TemplateListResponse { total, items }))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    tag = "templates",
    request_body = TemplateRequest,
    responses(
        (status = 201, description = "Template registered", body = Template),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<TemplateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let template = state
        .db
        .template_repository
        .create(&TemplateInput::from(req))
        .await?;
    tracing::info!(template_id = template.id, "Template registered");
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Template not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let template = state
        .db
        .template_repository
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    request_body = TemplateRequest,
    responses(
        (status = 200, description = "Template updated; applies to future generations", body = Template),
        (status = 404, description = "Template not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<TemplateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let template = state
        .db
        .template_repository
        .update(id, &TemplateInput::from(req))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.template_repository.delete(id).await? {
        return Err(not_found(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/templates/{id}/preview",
    tag = "templates",
    params(("id" = i64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template shell rendered with no videos", body = PreviewResponse),
        (status = 404, description = "Template not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Template file missing", body = crate::error::ErrorResponse),
    )
)]
pub async fn preview_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state.engine.preview.preview_template_shell(id).await?;
    Ok(Json(PreviewResponse {
        template_id: outcome.template_id,
        selected_video_ids: outcome.selected_video_ids,
        preview_url: outcome.preview_url,
    }))
}
