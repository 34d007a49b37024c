//! Template rendering shared by generation and preview

use std::path::PathBuf;

use lps_core::config::EngineConfig;
use lps_core::models::Template;

use crate::error::{GenerationError, GenerationResult};
use crate::resolver::PathResolver;
use crate::rewriter::{rewrite_page, static_prefix};

/// Fail unless `supplied` videos cover the template's requirement.
pub(crate) fn check_capacity(template: &Template, supplied: usize) -> GenerationResult<()> {
    if supplied < template.required_videos() {
        return Err(GenerationError::CapacityViolation {
            template_id: template.id,
            supplied,
            required: template.max_videos,
        });
    }
    Ok(())
}

/// The head of the request's ordering, `max_videos` long.
pub(crate) fn select_videos(video_ids: &[i64], template: &Template) -> Vec<i64> {
    video_ids
        .iter()
        .take(template.required_videos())
        .copied()
        .collect()
}

/// Reads a template from disk and rewrites it for a selection
pub struct PageRenderer {
    resolver: PathResolver,
    templates_root: PathBuf,
}

impl PageRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            resolver: PathResolver::from_config(config),
            templates_root: config.templates_root.clone(),
        }
    }

    pub async fn render(&self, template: &Template, video_ids: &[i64]) -> GenerationResult<String> {
        let path = self.resolver.resolve(&template.html_file_path)?;
        // The file may vanish between resolution and read
        let html = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => GenerationError::TemplateFileNotFound {
                    path: template.html_file_path.clone(),
                },
                _ => GenerationError::TemplateFileReadError {
                    path: path.display().to_string(),
                    source,
                },
            })?;

        let prefix = static_prefix(template.static_assets_path.as_deref(), &self.templates_root);
        Ok(rewrite_page(&html, &prefix, video_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use tempfile::tempdir;

    fn template(id: i64, html_file_path: &str, max_videos: i32) -> Template {
        Template {
            id,
            name: format!("t{}", id),
            description: None,
            thumbnail_url: None,
            html_file_path: html_file_path.to_string(),
            max_videos,
            static_assets_path: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_selection_takes_head_of_request_order() {
        let t = template(1, "x.html", 2);
        assert_eq!(select_videos(&[30, 10, 20], &t), vec![30, 10]);
        assert_eq!(select_videos(&[30, 10], &t), vec![30, 10]);
    }

    #[test]
    fn test_capacity_shortfall() {
        let t = template(8, "x.html", 3);
        assert_matches!(
            check_capacity(&t, 2),
            Err(GenerationError::CapacityViolation {
                template_id: 8,
                supplied: 2,
                required: 3
            })
        );
        assert!(check_capacity(&t, 3).is_ok());
    }

    #[tokio::test]
    async fn test_render_uses_assets_prefix() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::from_project_root(dir.path());
        std::fs::create_dir_all(config.templates_root.join("spring")).unwrap();
        std::fs::write(
            config.templates_root.join("spring/index.html"),
            r#"<html><body><img src="./hero.png"></body></html>"#,
        )
        .unwrap();

        let mut t = template(2, "spring/index.html", 1);
        t.static_assets_path = Some("spring".to_string());

        let page = PageRenderer::new(&config).render(&t, &[11]).await.unwrap();
        assert!(page.contains(r#"src="/templates/spring/hero.png""#));
        assert!(page.contains(">[11]</script>\n</body>"));
    }

    #[tokio::test]
    async fn test_unreadable_bytes_are_read_errors() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::from_project_root(dir.path());
        std::fs::create_dir_all(&config.templates_root).unwrap();
        std::fs::write(config.templates_root.join("bad.html"), [0xff, 0xfe, 0x00]).unwrap();

        let t = template(3, "bad.html", 1);
        assert_matches!(
            PageRenderer::new(&config).render(&t, &[1]).await,
            Err(GenerationError::TemplateFileReadError { .. })
        );
    }
}
