//! Workflow API handlers
//!
//! Workflows batch the landing pages generated from one video selection. Generation and
//! preview delegate to the engine services; everything else is plain record access.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use lps_core::constants::DEFAULT_CREATOR;
use lps_core::models::{LandingPageSummary, Workflow, WorkflowStatus, WorkflowWithCount};
use lps_core::AppError;
use lps_engine::GenerateRequest;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::page_window;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkflowRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateLandingPagesRequest {
    /// Ordered selection; each template uses the first `max_videos` ids
    #[validate(length(min = 1))]
    pub video_ids: Vec<i64>,
    #[validate(length(min = 1))]
    pub template_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PreviewLandingPageRequest {
    pub template_id: i64,
    #[validate(length(min = 1))]
    pub video_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListWorkflowsQuery {
    pub status: Option<WorkflowStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkflowResponse {
    pub id: i64,
    pub name: String,
    pub status: WorkflowStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Workflow> for WorkflowResponse {
    fn from(w: Workflow) -> Self {
        WorkflowResponse {
            id: w.id,
            name: w.name,
            status: w.status,
            created_by: w.created_by,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkflowListItem {
    pub id: i64,
    pub name: String,
    pub status: WorkflowStatus,
    pub created_by: String,
    pub landing_page_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkflowWithCount> for WorkflowListItem {
    fn from(w: WorkflowWithCount) -> Self {
        WorkflowListItem {
            id: w.id,
            name: w.name,
            status: w.status,
            created_by: w.created_by,
            landing_page_count: w.landing_page_count,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkflowListResponse {
    pub total: i64,
    pub items: Vec<WorkflowListItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkflowDetailResponse {
    #[serde(flatten)]
    pub workflow: WorkflowResponse,
    pub landing_pages: Vec<LandingPageSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateLandingPagesResponse {
    pub workflow_id: i64,
    pub landing_pages: Vec<LandingPageSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub template_id: i64,
    pub selected_video_ids: Vec<i64>,
    pub preview_url: String,
}

#[utoipa::path(
    get,
    path = "/api/workflows",
    tag = "workflows",
    params(ListWorkflowsQuery),
    responses(
        (status = 200, description = "Page of workflows", body = WorkflowListResponse),
        (status = 400, description = "Invalid paging", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_workflows(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListWorkflowsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = page_window(q.page, q.page_size)?;
    let (rows, total) = state
        .db
        .workflow_repository
        .list(q.status, limit, offset)
        .await?;
    Ok(Json(WorkflowListResponse {
        total,
        items: rows.into_iter().map(WorkflowListItem::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/workflows",
    tag = "workflows",
    request_body = CreateWorkflowRequest,
    responses(
        (status = 201, description = "Workflow created in draft", body = WorkflowResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_workflow(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateWorkflowRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let created_by = req.created_by.as_deref().unwrap_or(DEFAULT_CREATOR);
    let workflow = state
        .db
        .workflow_repository
        .create(&req.name, created_by)
        .await?;
    tracing::info!(workflow_id = workflow.id, "Workflow created");
    Ok((StatusCode::CREATED, Json(WorkflowResponse::from(workflow))))
}

#[utoipa::path(
    get,
    path = "/api/workflows/{id}",
    tag = "workflows",
    params(("id" = i64, Path, description = "Workflow ID")),
    responses(
        (status = 200, description = "Workflow with its landing pages", body = WorkflowDetailResponse),
        (status = 404, description = "Workflow not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workflow = state
        .db
        .workflow_repository
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workflow {} not found", id)))?;
    let landing_pages = state
        .db
        .landing_page_repository
        .list_by_workflow(id)
        .await?;
    Ok(Json(WorkflowDetailResponse {
        workflow: WorkflowResponse::from(workflow),
        landing_pages: landing_pages
            .into_iter()
            .map(LandingPageSummary::from)
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/workflows/{id}/generate",
    tag = "workflows",
    params(("id" = i64, Path, description = "Workflow ID")),
    request_body = GenerateLandingPagesRequest,
    responses(
        (status = 200, description = "Landing pages generated, workflow moved to pending_ad", body = GenerateLandingPagesResponse),
        (status = 400, description = "Empty video or template list", body = crate::error::ErrorResponse),
        (status = 404, description = "Workflow or templates not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Workflow not in draft, or templates already generated", body = crate::error::ErrorResponse),
        (status = 422, description = "Too few videos, or template file missing", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_landing_pages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<GenerateLandingPagesRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state
        .engine
        .generation
        .generate(GenerateRequest {
            workflow_id: id,
            video_ids: req.video_ids,
            template_ids: req.template_ids,
        })
        .await?;
    Ok(Json(GenerateLandingPagesResponse {
        workflow_id: outcome.workflow_id,
        landing_pages: outcome.landing_pages,
    }))
}

#[utoipa::path(
    post,
    path = "/api/workflows/preview",
    tag = "workflows",
    request_body = PreviewLandingPageRequest,
    responses(
        (status = 200, description = "Preview written", body = PreviewResponse),
        (status = 404, description = "Template not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Too few videos, or template file missing", body = crate::error::ErrorResponse),
    )
)]
pub async fn preview_landing_page(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PreviewLandingPageRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state
        .engine
        .preview
        .preview(req.template_id, &req.video_ids)
        .await?;
    Ok(Json(PreviewResponse {
        template_id: outcome.template_id,
        selected_video_ids: outcome.selected_video_ids,
        preview_url: outcome.preview_url,
    }))
}

#[utoipa::path(
    post,
    path = "/api/workflows/{id}/archive",
    tag = "workflows",
    params(("id" = i64, Path, description = "Workflow ID")),
    responses(
        (status = 200, description = "Workflow archived", body = WorkflowResponse),
        (status = 404, description = "Workflow not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Workflow is not ready", body = crate::error::ErrorResponse),
    )
)]
pub async fn archive_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let repo = &state.db.workflow_repository;
    if let Some(workflow) = repo
        .transition_status(id, WorkflowStatus::Ready, WorkflowStatus::Archived)
        .await?
    {
        tracing::info!(workflow_id = id, "Workflow archived");
        return Ok(Json(WorkflowResponse::from(workflow)));
    }

    let err = match repo.get(id).await? {
        None => AppError::NotFound(format!("Workflow {} not found", id)),
        Some(w) => AppError::InvalidState(format!(
            "Workflow {} is {}, only ready workflows can be archived",
            id, w.status
        )),
    };
    Err(err.into())
}

#[utoipa::path(
    delete,
    path = "/api/workflows/{id}",
    tag = "workflows",
    params(("id" = i64, Path, description = "Workflow ID")),
    responses(
        (status = 204, description = "Workflow and its landing pages deleted"),
        (status = 404, description = "Workflow not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.workflow_repository.delete(id).await? {
        return Err(AppError::NotFound(format!("Workflow {} not found", id)).into());
    }
    tracing::info!(workflow_id = id, "Workflow deleted");
    Ok(StatusCode::NO_CONTENT)
}
