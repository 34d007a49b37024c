//! Video catalog repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{PgPool, Postgres};

use lps_core::constants::DEFAULT_RECORD_STATUS;
use lps_core::models::{Video, VideoInput};

const VIDEO_COLUMNS: &str =
    "id, external_id, title, category, poster_url, view_count, status, created_at, updated_at";

#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &VideoInput) -> Result<Video> {
        let now = Utc::now();
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            INSERT INTO video (external_id, title, category, poster_url, view_count, status,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(input.external_id.as_deref())
        .bind(&input.title)
        .bind(input.category.as_deref())
        .bind(&input.poster_url)
        .bind(input.view_count)
        .bind(DEFAULT_RECORD_STATUS)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create video")?;
        Ok(video)
    }

    pub async fn get(&self, video_id: i64) -> Result<Option<Video>> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM video WHERE id = $1"
        ))
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get video")?;
        Ok(video)
    }

    /// One page of videos, newest id first, optionally restricted to a category.
    /// Returns the page and the total number of matching rows.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Video>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM video WHERE ($1::text IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count videos")?;

        let rows = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM video
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list videos")?;
        Ok((rows, total))
    }

    pub async fn update(&self, video_id: i64, input: &VideoInput) -> Result<Option<Video>> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE video
            SET external_id = $2, title = $3, category = $4, poster_url = $5,
                view_count = $6, updated_at = $7
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(video_id)
        .bind(input.external_id.as_deref())
        .bind(&input.title)
        .bind(input.category.as_deref())
        .bind(&input.poster_url)
        .bind(input.view_count)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update video")?;
        Ok(video)
    }

    pub async fn delete(&self, video_id: i64) -> Result<bool> {
        let r = sqlx::query("DELETE FROM video WHERE id = $1")
            .bind(video_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete video")?;
        Ok(r.rows_affected() > 0)
    }
}
