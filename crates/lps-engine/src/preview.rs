//! One-off previews
//!
//! Previews never touch workflow or landing page records and skip the draft-state and
//! uniqueness checks. Each call writes a new file under the preview directory.

use std::sync::Arc;

use lps_core::config::EngineConfig;
use lps_core::models::Template;
use lps_core::store::GenerationStore;

use crate::error::{GenerationError, GenerationResult};
use crate::output::OutputWriter;
use crate::renderer::{check_capacity, select_videos, PageRenderer};

/// A rendered preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub template_id: i64,
    pub selected_video_ids: Vec<i64>,
    pub preview_url: String,
}

pub struct PreviewService {
    store: Arc<dyn GenerationStore>,
    renderer: PageRenderer,
    writer: OutputWriter,
}

impl PreviewService {
    pub fn new(store: Arc<dyn GenerationStore>, config: &EngineConfig) -> Self {
        Self {
            store,
            renderer: PageRenderer::new(config),
            writer: OutputWriter::new(&config.generated_root),
        }
    }

    /// Render one template with the head of `video_ids`, subject to the same capacity rule
    /// as generation.
    #[tracing::instrument(skip(self, video_ids))]
    pub async fn preview(
        &self,
        template_id: i64,
        video_ids: &[i64],
    ) -> GenerationResult<PreviewOutcome> {
        if video_ids.is_empty() {
            return Err(GenerationError::InvalidInput(
                "video_ids must contain at least one id".to_string(),
            ));
        }

        let template = self.template(template_id).await?;
        check_capacity(&template, video_ids.len())?;
        let selected = select_videos(video_ids, &template);
        self.render_and_write(&template, selected).await
    }

    /// Render the bare template shell with an empty selection.
    #[tracing::instrument(skip(self))]
    pub async fn preview_template_shell(&self, template_id: i64) -> GenerationResult<PreviewOutcome> {
        let template = self.template(template_id).await?;
        self.render_and_write(&template, Vec::new()).await
    }

    async fn template(&self, template_id: i64) -> GenerationResult<Template> {
        self.store
            .find_template(template_id)
            .await?
            .ok_or_else(|| GenerationError::TemplatesNotFound(vec![template_id]))
    }

    async fn render_and_write(
        &self,
        template: &Template,
        selected: Vec<i64>,
    ) -> GenerationResult<PreviewOutcome> {
        let html = self.renderer.render(template, &selected).await?;
        let page = self.writer.write_preview(template.id, &html).await?;
        tracing::debug!(url = %page.url, "Preview written");

        Ok(PreviewOutcome {
            template_id: template.id,
            selected_video_ids: selected,
            preview_url: page.url,
        })
    }
}
