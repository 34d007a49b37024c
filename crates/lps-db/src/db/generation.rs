//! Postgres-backed record store for the generation engine
//!
//! Every unit of work owns one database transaction. `lock_workflow` takes a row lock
//! (`SELECT ... FOR UPDATE`) so concurrent generation requests for the same workflow are
//! serialised; the second one sees the committed `pending_ad` status and is rejected.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};

use lps_core::error::AppError;
use lps_core::models::{NewLandingPage, Template, Workflow, WorkflowStatus};
use lps_core::store::{GenerationStore, GenerationUnit};

use super::template::TEMPLATE_COLUMNS;
use super::transaction::TransactionGuard;
use super::workflow::WORKFLOW_COLUMNS;

#[derive(Clone)]
pub struct PgGenerationStore {
    pool: PgPool,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn begin(&self) -> Result<Box<dyn GenerationUnit>, AppError> {
        let guard = TransactionGuard::begin(&self.pool).await?;
        Ok(Box::new(PgGenerationUnit { guard }))
    }

    #[tracing::instrument(skip(self))]
    async fn find_template(&self, template_id: i64) -> Result<Option<Template>, AppError> {
        let template = sqlx::query_as::<Postgres, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM template WHERE id = $1"
        ))
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(template)
    }
}

/// One generation transaction
pub struct PgGenerationUnit {
    guard: TransactionGuard,
}

#[async_trait]
impl GenerationUnit for PgGenerationUnit {
    #[tracing::instrument(skip(self))]
    async fn lock_workflow(&mut self, workflow_id: i64) -> Result<Option<Workflow>, AppError> {
        let conn = self.guard.connection()?;
        let workflow = sqlx::query_as::<Postgres, Workflow>(&format!(
            "SELECT {WORKFLOW_COLUMNS} FROM workflow WHERE id = $1 FOR UPDATE"
        ))
        .bind(workflow_id)
        .fetch_optional(conn)
        .await?;
        Ok(workflow)
    }

    #[tracing::instrument(skip(self))]
    async fn templates_by_ids(&mut self, template_ids: &[i64]) -> Result<Vec<Template>, AppError> {
        let conn = self.guard.connection()?;
        let templates = sqlx::query_as::<Postgres, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM template WHERE id = ANY($1)"
        ))
        .bind(template_ids)
        .fetch_all(conn)
        .await?;
        Ok(templates)
    }

    #[tracing::instrument(skip(self))]
    async fn existing_landing_page_template_ids(
        &mut self,
        workflow_id: i64,
        template_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let conn = self.guard.connection()?;
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT template_id
            FROM landing_page
            WHERE workflow_id = $1 AND template_id = ANY($2)
            ORDER BY template_id
            "#,
        )
        .bind(workflow_id)
        .bind(template_ids)
        .fetch_all(conn)
        .await?;
        Ok(ids)
    }

    #[tracing::instrument(skip(self, landing_page), fields(
        workflow_id = landing_page.workflow_id,
        template_id = landing_page.template_id,
    ))]
    async fn create_landing_page(&mut self, landing_page: NewLandingPage) -> Result<i64, AppError> {
        let conn = self.guard.connection()?;
        let result = sqlx::query_scalar::<Postgres, i64>(
            r#"
            INSERT INTO landing_page (workflow_id, template_id, selected_video_ids,
                generated_page_url, created_at)
            VALUES ($1, $2, $3, '', $4)
            RETURNING id
            "#,
        )
        .bind(landing_page.workflow_id)
        .bind(landing_page.template_id)
        .bind(&landing_page.selected_video_ids)
        .bind(Utc::now())
        .fetch_one(conn)
        .await;

        match result {
            Ok(id) => Ok(id),
            // Lost a race with another unit that committed the same (workflow, template)
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateGeneration {
                    template_ids: vec![landing_page.template_id],
                })
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn set_landing_page_url(
        &mut self,
        landing_page_id: i64,
        url: &str,
    ) -> Result<(), AppError> {
        let conn = self.guard.connection()?;
        sqlx::query("UPDATE landing_page SET generated_page_url = $2 WHERE id = $1")
            .bind(landing_page_id)
            .bind(url)
            .execute(conn)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_workflow_status(
        &mut self,
        workflow_id: i64,
        status: WorkflowStatus,
    ) -> Result<(), AppError> {
        let conn = self.guard.connection()?;
        sqlx::query("UPDATE workflow SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(workflow_id)
            .bind(status)
            .bind(Utc::now())
            .execute(conn)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.guard.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.guard.rollback().await?;
        Ok(())
    }
}
