//! Batch landing page generation
//!
//! One request binds one workflow, an ordered video selection and a list of templates.
//! All checks and record mutations happen inside a single [`GenerationUnit`]; the unit is
//! committed only after every template has been rendered and written, and rolled back
//! explicitly on any failure.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use lps_core::config::EngineConfig;
use lps_core::models::{LandingPageSummary, NewLandingPage, Template, WorkflowStatus};
use lps_core::store::{GenerationStore, GenerationUnit};

use crate::error::{GenerationError, GenerationResult};
use crate::output::OutputWriter;
use crate::renderer::{check_capacity, select_videos, PageRenderer};

/// Input of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub workflow_id: i64,
    /// Shared across all templates; each template takes its own head of this list.
    pub video_ids: Vec<i64>,
    pub template_ids: Vec<i64>,
}

/// Landing pages created by a successful generation, in request order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub workflow_id: i64,
    pub landing_pages: Vec<LandingPageSummary>,
}

pub struct GenerationService {
    store: Arc<dyn GenerationStore>,
    renderer: PageRenderer,
    writer: OutputWriter,
    cleanup_on_failure: bool,
}

impl GenerationService {
    pub fn new(store: Arc<dyn GenerationStore>, config: &EngineConfig) -> Self {
        Self {
            store,
            renderer: PageRenderer::new(config),
            writer: OutputWriter::new(&config.generated_root),
            cleanup_on_failure: config.cleanup_on_failure,
        }
    }

    /// Generate landing pages for every requested template and move the workflow to
    /// `pending_ad`, or change nothing in the record store.
    #[tracing::instrument(skip(self, request), fields(workflow_id = request.workflow_id))]
    pub async fn generate(&self, request: GenerateRequest) -> GenerationResult<GenerationOutcome> {
        if request.video_ids.is_empty() {
            return Err(GenerationError::InvalidInput(
                "video_ids must contain at least one id".to_string(),
            ));
        }
        if request.template_ids.is_empty() {
            return Err(GenerationError::InvalidInput(
                "template_ids must contain at least one id".to_string(),
            ));
        }

        let mut unit = self.store.begin().await?;
        let mut written: Vec<PathBuf> = Vec::new();

        let result = self.run(unit.as_mut(), &request, &mut written).await;
        let landing_pages = match result {
            Ok(landing_pages) => landing_pages,
            Err(e) => {
                if let Err(rollback_err) = unit.rollback().await {
                    tracing::error!(error = %rollback_err, "Failed to roll back generation");
                }
                tracing::warn!(error = %e, "Generation failed, changes rolled back");
                self.handle_orphans(&written).await;
                return Err(e);
            }
        };

        if let Err(e) = unit.commit().await {
            tracing::warn!(error = %e, "Failed to commit generation");
            self.handle_orphans(&written).await;
            return Err(e.into());
        }

        tracing::info!(
            landing_page_count = landing_pages.len(),
            "Generated landing pages"
        );

        Ok(GenerationOutcome {
            workflow_id: request.workflow_id,
            landing_pages,
        })
    }

    async fn run(
        &self,
        unit: &mut dyn GenerationUnit,
        request: &GenerateRequest,
        written: &mut Vec<PathBuf>,
    ) -> GenerationResult<Vec<LandingPageSummary>> {
        let workflow_id = request.workflow_id;
        let workflow = unit
            .lock_workflow(workflow_id)
            .await?
            .ok_or(GenerationError::WorkflowNotFound(workflow_id))?;

        if workflow.status != WorkflowStatus::Draft {
            return Err(GenerationError::InvalidState {
                workflow_id,
                status: workflow.status,
            });
        }

        let template_ids = dedup_preserving_order(&request.template_ids);
        let templates = self.load_templates(unit, &template_ids).await?;

        for template in &templates {
            check_capacity(template, request.video_ids.len())?;
        }

        let mut existing = unit
            .existing_landing_page_template_ids(workflow_id, &template_ids)
            .await?;
        if !existing.is_empty() {
            existing.sort_unstable();
            existing.dedup();
            return Err(GenerationError::DuplicateGeneration {
                template_ids: existing,
            });
        }

        let mut landing_pages = Vec::with_capacity(templates.len());
        for template in &templates {
            let selected = select_videos(&request.video_ids, template);
            let landing_page_id = unit
                .create_landing_page(NewLandingPage {
                    workflow_id,
                    template_id: template.id,
                    selected_video_ids: selected.clone(),
                })
                .await?;

            let html = self.renderer.render(template, &selected).await?;
            let page = self
                .writer
                .write_landing_page(workflow_id, landing_page_id, &html)
                .await?;
            written.push(page.path);

            unit.set_landing_page_url(landing_page_id, &page.url).await?;
            tracing::debug!(
                template_id = template.id,
                landing_page_id,
                url = %page.url,
                "Landing page written"
            );

            landing_pages.push(LandingPageSummary {
                id: landing_page_id,
                template_id: template.id,
                selected_video_ids: selected,
                generated_page_url: page.url,
            });
        }

        unit.update_workflow_status(workflow_id, WorkflowStatus::PendingAd)
            .await?;

        Ok(landing_pages)
    }

    /// Templates for `template_ids`, in the same order. Fails listing every id that does
    /// not exist.
    async fn load_templates(
        &self,
        unit: &mut dyn GenerationUnit,
        template_ids: &[i64],
    ) -> GenerationResult<Vec<Template>> {
        let mut by_id: HashMap<i64, Template> = unit
            .templates_by_ids(template_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let missing: Vec<i64> = template_ids
            .iter()
            .filter(|id| !by_id.contains_key(id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(GenerationError::TemplatesNotFound(missing));
        }

        Ok(template_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect())
    }

    async fn handle_orphans(&self, written: &[PathBuf]) {
        if written.is_empty() {
            return;
        }
        if self.cleanup_on_failure {
            let failed = self.writer.remove_files(written).await;
            tracing::info!(
                removed = written.len() - failed.len(),
                failed = failed.len(),
                "Removed files written by failed generation"
            );
        } else {
            tracing::warn!(
                files = ?written,
                "Files written by failed generation were left on disk"
            );
        }
    }
}

/// Collapse repeated ids, keeping the first occurrence of each.
fn dedup_preserving_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
