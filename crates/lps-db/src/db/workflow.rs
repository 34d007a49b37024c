//! Workflow repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{PgPool, Postgres};

use lps_core::models::{Workflow, WorkflowStatus, WorkflowWithCount};

pub(crate) const WORKFLOW_COLUMNS: &str = "id, name, status, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct WorkflowRepository {
    pool: PgPool,
}

impl WorkflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a workflow in `draft`.
    pub async fn create(&self, name: &str, created_by: &str) -> Result<Workflow> {
        let now = Utc::now();
        let w = sqlx::query_as::<Postgres, Workflow>(&format!(
            r#"
            INSERT INTO workflow (name, status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {WORKFLOW_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(WorkflowStatus::Draft)
        .bind(created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create workflow")?;
        Ok(w)
    }

    pub async fn get(&self, workflow_id: i64) -> Result<Option<Workflow>> {
        let w = sqlx::query_as::<Postgres, Workflow>(&format!(
            "SELECT {WORKFLOW_COLUMNS} FROM workflow WHERE id = $1"
        ))
        .bind(workflow_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get workflow")?;
        Ok(w)
    }

    /// One page of workflows with their landing page counts, newest id first.
    pub async fn list(
        &self,
        status: Option<WorkflowStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<WorkflowWithCount>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workflow WHERE ($1::workflow_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count workflows")?;

        let rows = sqlx::query_as::<Postgres, WorkflowWithCount>(
            r#"
            SELECT w.id, w.name, w.status, w.created_by, w.created_at, w.updated_at,
                COUNT(lp.id) AS landing_page_count
            FROM workflow w
            LEFT JOIN landing_page lp ON lp.workflow_id = w.id
            WHERE ($1::workflow_status IS NULL OR w.status = $1)
            GROUP BY w.id
            ORDER BY w.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list workflows")?;
        Ok((rows, total))
    }

    /// Move a workflow from `from` to `to`. Returns `None` when the workflow does not
    /// exist or is not currently in `from`.
    pub async fn transition_status(
        &self,
        workflow_id: i64,
        from: WorkflowStatus,
        to: WorkflowStatus,
    ) -> Result<Option<Workflow>> {
        let w = sqlx::query_as::<Postgres, Workflow>(&format!(
            r#"
            UPDATE workflow
            SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2
            RETURNING {WORKFLOW_COLUMNS}
            "#
        ))
        .bind(workflow_id)
        .bind(from)
        .bind(to)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update workflow status")?;
        Ok(w)
    }

    /// Delete a workflow together with its landing pages (cascade).
    pub async fn delete(&self, workflow_id: i64) -> Result<bool> {
        let r = sqlx::query("DELETE FROM workflow WHERE id = $1")
            .bind(workflow_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete workflow")?;
        Ok(r.rows_affected() > 0)
    }
}
