//! Record-store traits consumed by the generation engine
//!
//! The engine never talks to a database directly. It opens a [`GenerationUnit`] through a
//! [`GenerationStore`], stages every read and write of one generation request inside that
//! unit, and ends it with exactly one `commit` or `rollback`. Implementations must give the
//! unit transactional isolation: a workflow locked by one unit cannot be observed in its
//! pre-commit state by a concurrent unit.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewLandingPage, Template, Workflow, WorkflowStatus};

/// Entry point to the record store
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Open a unit of work. Every mutation made through it is invisible to other units
    /// until [`GenerationUnit::commit`].
    async fn begin(&self) -> Result<Box<dyn GenerationUnit>, AppError>;

    /// Fetch a single template outside any unit of work (preview path).
    async fn find_template(&self, template_id: i64) -> Result<Option<Template>, AppError>;
}

/// One transactional unit of work
#[async_trait]
pub trait GenerationUnit: Send {
    /// Fetch the workflow and hold it until the unit ends, serialising concurrent
    /// generation attempts for the same workflow.
    async fn lock_workflow(&mut self, workflow_id: i64) -> Result<Option<Workflow>, AppError>;

    /// Fetch every existing template among `template_ids` (order unspecified).
    async fn templates_by_ids(&mut self, template_ids: &[i64]) -> Result<Vec<Template>, AppError>;

    /// Template ids among `template_ids` that already have a landing page in the workflow.
    async fn existing_landing_page_template_ids(
        &mut self,
        workflow_id: i64,
        template_ids: &[i64],
    ) -> Result<Vec<i64>, AppError>;

    /// Stage a landing page and return its allocated id. The row carries an empty URL
    /// until [`GenerationUnit::set_landing_page_url`] is called.
    async fn create_landing_page(&mut self, landing_page: NewLandingPage) -> Result<i64, AppError>;

    async fn set_landing_page_url(&mut self, landing_page_id: i64, url: &str)
        -> Result<(), AppError>;

    async fn update_workflow_status(
        &mut self,
        workflow_id: i64,
        status: WorkflowStatus,
    ) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;

    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}
