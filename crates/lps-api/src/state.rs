//! Application state and sub-states.
//!
//! Handlers extract `State<Arc<AppState>>` and reach into the sub-state they need.

use std::sync::Arc;

use lps_core::{Config, EngineConfig};
use lps_db::{LandingPageRepository, TemplateRepository, VideoRepository, WorkflowRepository};
use lps_engine::{GenerationService, PreviewService};
use sqlx::PgPool;

/// Database pool and entity repositories
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub workflow_repository: WorkflowRepository,
    pub template_repository: TemplateRepository,
    pub video_repository: VideoRepository,
    pub landing_page_repository: LandingPageRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workflow_repository: WorkflowRepository::new(pool.clone()),
            template_repository: TemplateRepository::new(pool.clone()),
            video_repository: VideoRepository::new(pool.clone()),
            landing_page_repository: LandingPageRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Landing page generation and preview services
#[derive(Clone)]
pub struct EngineState {
    pub generation: Arc<GenerationService>,
    pub preview: Arc<PreviewService>,
    pub config: EngineConfig,
}

pub struct AppState {
    pub db: DbState,
    pub engine: EngineState,
    pub config: Config,
}
