//! Video catalog records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Video asset (database row)
///
/// The generation engine only ever refers to videos by id; the remaining fields feed the
/// catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Video {
    pub id: i64,
    pub external_id: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub poster_url: String,
    pub view_count: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when registering or editing a video
#[derive(Debug, Clone)]
pub struct VideoInput {
    pub external_id: Option<String>,
    pub title: String,
    pub category: Option<String>,
    pub poster_url: String,
    pub view_count: i64,
}
