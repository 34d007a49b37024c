//! Generated page output
//!
//! Landing pages go to `<generated_root>/<workflow_id>/<landing_page_id>.html` and are
//! served as `/generated/<workflow_id>/<landing_page_id>.html`. Previews go to
//! `<generated_root>/preview/<template_id>_<token>.html` with a fresh random token per call.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use lps_core::constants::{GENERATED_URL_ROOT, PREVIEW_DIR};

use crate::error::{GenerationError, GenerationResult};

/// A page written to disk and the URL it is served under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub path: PathBuf,
    pub url: String,
}

/// Writes rendered pages below the generated-content root
#[derive(Debug, Clone)]
pub struct OutputWriter {
    generated_root: PathBuf,
}

impl OutputWriter {
    pub fn new(generated_root: impl Into<PathBuf>) -> Self {
        Self {
            generated_root: generated_root.into(),
        }
    }

    pub fn generated_root(&self) -> &Path {
        &self.generated_root
    }

    pub fn landing_page_path(&self, workflow_id: i64, landing_page_id: i64) -> PathBuf {
        self.generated_root
            .join(workflow_id.to_string())
            .join(format!("{}.html", landing_page_id))
    }

    pub fn landing_page_url(workflow_id: i64, landing_page_id: i64) -> String {
        format!(
            "{}/{}/{}.html",
            GENERATED_URL_ROOT, workflow_id, landing_page_id
        )
    }

    /// Write a landing page. Overwrites any stale file at the same path.
    pub async fn write_landing_page(
        &self,
        workflow_id: i64,
        landing_page_id: i64,
        html: &str,
    ) -> GenerationResult<WrittenPage> {
        let path = self.landing_page_path(workflow_id, landing_page_id);
        write_file(&path, html).await?;
        Ok(WrittenPage {
            path,
            url: Self::landing_page_url(workflow_id, landing_page_id),
        })
    }

    /// Write a preview under a name that has never been used before.
    pub async fn write_preview(&self, template_id: i64, html: &str) -> GenerationResult<WrittenPage> {
        let filename = format!("{}_{}.html", template_id, Uuid::new_v4().simple());
        let path = self.generated_root.join(PREVIEW_DIR).join(&filename);
        write_file(&path, html).await?;
        Ok(WrittenPage {
            path,
            url: format!("{}/{}/{}", GENERATED_URL_ROOT, PREVIEW_DIR, filename),
        })
    }

    /// Best-effort removal of previously written files. Returns the paths that could not be
    /// removed.
    pub async fn remove_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut failed = Vec::new();
        for path in paths {
            if let Err(e) = fs::remove_file(path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove generated file"
                    );
                    failed.push(path.clone());
                }
            }
        }
        failed
    }
}

async fn write_file(path: &Path, html: &str) -> GenerationResult<()> {
    let to_error = |source| GenerationError::OutputWriteError {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(to_error)?;
    }
    fs::write(path, html).await.map_err(to_error)
}
