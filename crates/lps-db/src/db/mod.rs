//! Database repositories for data access layer
//!
//! Each repository is responsible for one entity and provides its CRUD operations and
//! list queries. `generation` holds the transactional store the generation engine drives.
//
// Entity repositories
pub mod landing_page;
pub mod template;
pub mod video;
pub mod workflow;
//
// Transactional record store for generation
pub mod generation;
//
// Transaction utilities
pub mod transaction;

pub use generation::{PgGenerationStore, PgGenerationUnit};
pub use landing_page::LandingPageRepository;
pub use template::TemplateRepository;
pub use transaction::TransactionGuard;
pub use video::VideoRepository;
pub use workflow::WorkflowRepository;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::PgPool;

/// Apply the SQL migrations shipped in the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}
