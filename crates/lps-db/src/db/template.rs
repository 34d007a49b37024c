//! Template repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{PgPool, Postgres};

use lps_core::models::{Template, TemplateInput};

pub(crate) const TEMPLATE_COLUMNS: &str = "id, name, description, thumbnail_url, html_file_path, \
     max_videos, static_assets_path, status, created_at";

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &TemplateInput) -> Result<Template> {
        let template = sqlx::query_as::<Postgres, Template>(&format!(
            r#"
            INSERT INTO template (name, description, thumbnail_url, html_file_path, max_videos,
                static_assets_path, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.thumbnail_url.as_deref())
        .bind(&input.html_file_path)
        .bind(input.max_videos)
        .bind(input.static_assets_path.as_deref())
        .bind(&input.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create template")?;
        Ok(template)
    }

    pub async fn get(&self, template_id: i64) -> Result<Option<Template>> {
        let template = sqlx::query_as::<Postgres, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM template WHERE id = $1"
        ))
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get template")?;
        Ok(template)
    }

    pub async fn list(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Template>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM template WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count templates")?;

        let rows = sqlx::query_as::<Postgres, Template>(&format!(
            r#"
            SELECT {TEMPLATE_COLUMNS}
            FROM template
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list templates")?;
        Ok((rows, total))
    }

    pub async fn update(&self, template_id: i64, input: &TemplateInput) -> Result<Option<Template>> {
        let template = sqlx::query_as::<Postgres, Template>(&format!(
            r#"
            UPDATE template
            SET name = $2, description = $3, thumbnail_url = $4, html_file_path = $5,
                max_videos = $6, static_assets_path = $7, status = $8
            WHERE id = $1
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(template_id)
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.thumbnail_url.as_deref())
        .bind(&input.html_file_path)
        .bind(input.max_videos)
        .bind(input.static_assets_path.as_deref())
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update template")?;
        Ok(template)
    }

    /// Delete a template. Landing pages generated from it keep their `template_id`.
    pub async fn delete(&self, template_id: i64) -> Result<bool> {
        let r = sqlx::query("DELETE FROM template WHERE id = $1")
            .bind(template_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete template")?;
        Ok(r.rows_affected() > 0)
    }
}
