//! Video catalog API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lps_core::models::{Video, VideoInput};
use lps_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::page_window;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VideoRequest {
    pub external_id: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub poster_url: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub view_count: i64,
}

impl From<VideoRequest> for VideoInput {
    fn from(req: VideoRequest) -> Self {
        VideoInput {
            external_id: req.external_id,
            title: req.title,
            category: req.category,
            poster_url: req.poster_url,
            view_count: req.view_count,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVideosQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoListResponse {
    pub total: i64,
    pub items: Vec<Video>,
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "Page of videos", body = VideoListResponse),
        (status = 400, description = "Invalid paging", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListVideosQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = page_window(q.page, q.page_size)?;
    let (items, total) = state
        .db
        .video_repository
        .list(q.category.as_deref(), limit, offset)
        .await?;
    Ok(Json(VideoListResponse { total, items }))
}

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = VideoRequest,
    responses(
        (status = 201, description = "Video registered", body = Video),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<VideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .video_repository
        .create(&VideoInput::from(req))
        .await?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video", body = Video),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .video_repository
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
    Ok(Json(video))
}

#[utoipa::path(
    put,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = i64, Path, description = "Video ID")),
    request_body = VideoRequest,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<VideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state
        .db
        .video_repository
        .update(id, &VideoInput::from(req))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
    Ok(Json(video))
}

#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    if !state.db.video_repository.delete(id).await? {
        return Err(AppError::NotFound(format!("Video {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
