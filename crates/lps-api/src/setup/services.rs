//! Service initialization and application state setup

use std::sync::Arc;

use anyhow::{Context, Result};
use lps_core::Config;
use lps_db::PgGenerationStore;
use lps_engine::{GenerationService, PreviewService};
use sqlx::PgPool;

use crate::state::{AppState, DbState, EngineState};

/// Build repositories and engine services over `pool`.
///
/// The generated root is created up front so it can be mounted before the first page exists.
pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let engine_config = config.engine_config();

    tokio::fs::create_dir_all(&engine_config.generated_root)
        .await
        .with_context(|| {
            format!(
                "Failed to create generated root {}",
                engine_config.generated_root.display()
            )
        })?;

    let store = Arc::new(PgGenerationStore::new(pool.clone()));
    let generation = Arc::new(GenerationService::new(store.clone(), &engine_config));
    let preview = Arc::new(PreviewService::new(store, &engine_config));

    tracing::info!(
        project_root = %engine_config.project_root.display(),
        templates_root = %engine_config.templates_root.display(),
        generated_root = %engine_config.generated_root.display(),
        cleanup_on_failure = engine_config.cleanup_on_failure,
        "Generation engine initialized"
    );

    Ok(Arc::new(AppState {
        db: DbState::new(pool),
        engine: EngineState {
            generation,
            preview,
            config: engine_config,
        },
        config: config.clone(),
    }))
}
