//! Generated landing page records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Landing page (database row)
///
/// At most one row exists per (workflow_id, template_id). `selected_video_ids` keeps the
/// display order baked into the generated file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LandingPage {
    pub id: i64,
    pub workflow_id: i64,
    pub template_id: i64,
    pub selected_video_ids: Vec<i64>,
    pub generated_page_url: String,
    pub created_at: DateTime<Utc>,
}

/// Landing page about to be inserted; the store allocates its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLandingPage {
    pub workflow_id: i64,
    pub template_id: i64,
    pub selected_video_ids: Vec<i64>,
}

/// What a caller learns about one generated landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LandingPageSummary {
    pub id: i64,
    pub template_id: i64,
    pub selected_video_ids: Vec<i64>,
    pub generated_page_url: String,
}

impl From<LandingPage> for LandingPageSummary {
    fn from(lp: LandingPage) -> Self {
        LandingPageSummary {
            id: lp.id,
            template_id: lp.template_id,
            selected_video_ids: lp.selected_video_ids,
            generated_page_url: lp.generated_page_url,
        }
    }
}
