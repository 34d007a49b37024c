//! Landing page repository (read side)
//!
//! Landing pages are only ever written by the generation unit of work in
//! [`crate::db::generation`]; this repository serves the workflow detail view.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres};

use lps_core::models::LandingPage;

#[derive(Clone)]
pub struct LandingPageRepository {
    pool: PgPool,
}

impl LandingPageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_workflow(&self, workflow_id: i64) -> Result<Vec<LandingPage>> {
        let rows = sqlx::query_as::<Postgres, LandingPage>(
            r#"
            SELECT id, workflow_id, template_id, selected_video_ids, generated_page_url,
                created_at
            FROM landing_page
            WHERE workflow_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(workflow_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list landing pages")?;
        Ok(rows)
    }
}
