//! Landing page template records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Template (database row)
///
/// `html_file_path` and `static_assets_path` are stored exactly as entered and may be
/// absolute or relative to any of the engine's roots. `max_videos` is the number of
/// videos the layout needs; generation requires at least that many.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub html_file_path: String,
    pub max_videos: i32,
    pub static_assets_path: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when registering or editing a template
#[derive(Debug, Clone)]
pub struct TemplateInput {
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub html_file_path: String,
    pub max_videos: i32,
    pub static_assets_path: Option<String>,
    pub status: String,
}

impl Template {
    /// Number of videos this template takes from the head of a selection.
    pub fn required_videos(&self) -> usize {
        usize::try_from(self.max_videos).unwrap_or(0)
    }
}
