//! Test helpers: an in-memory record store and a temporary project layout.
//!
//! Units stage every mutation locally and apply them to the shared state only on commit,
//! so a rolled-back generation is observable as "nothing changed".

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use lps_core::config::EngineConfig;
use lps_core::error::AppError;
use lps_core::models::{LandingPage, NewLandingPage, Template, Workflow, WorkflowStatus};
use lps_core::store::{GenerationStore, GenerationUnit};
use tempfile::TempDir;

#[derive(Default)]
struct State {
    workflows: HashMap<i64, Workflow>,
    templates: HashMap<i64, Template>,
    landing_pages: Vec<LandingPage>,
    next_landing_page_id: i64,
}

/// Shared in-memory store
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().next_landing_page_id = 1;
        store
    }

    pub fn add_workflow(&self, id: i64, status: WorkflowStatus) {
        let now = Utc::now();
        self.state.lock().unwrap().workflows.insert(
            id,
            Workflow {
                id,
                name: format!("workflow-{}", id),
                status,
                created_by: "system".to_string(),
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub fn add_template(&self, id: i64, html_file_path: &str, max_videos: i32) {
        self.add_template_with_assets(id, html_file_path, max_videos, None);
    }

    pub fn add_template_with_assets(
        &self,
        id: i64,
        html_file_path: &str,
        max_videos: i32,
        static_assets_path: Option<&str>,
    ) {
        self.state.lock().unwrap().templates.insert(
            id,
            Template {
                id,
                name: format!("template-{}", id),
                description: None,
                thumbnail_url: None,
                html_file_path: html_file_path.to_string(),
                max_videos,
                static_assets_path: static_assets_path.map(str::to_string),
                status: "active".to_string(),
                created_at: Utc::now(),
            },
        );
    }

    pub fn workflow_status(&self, id: i64) -> Option<WorkflowStatus> {
        self.state
            .lock()
            .unwrap()
            .workflows
            .get(&id)
            .map(|w| w.status)
    }

    pub fn landing_pages(&self, workflow_id: i64) -> Vec<LandingPage> {
        self.state
            .lock()
            .unwrap()
            .landing_pages
            .iter()
            .filter(|lp| lp.workflow_id == workflow_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GenerationStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn GenerationUnit>, AppError> {
        Ok(Box::new(MemoryUnit {
            state: self.state.clone(),
            staged_pages: Vec::new(),
            staged_status: None,
        }))
    }

    async fn find_template(&self, template_id: i64) -> Result<Option<Template>, AppError> {
        Ok(self.state.lock().unwrap().templates.get(&template_id).cloned())
    }
}

struct MemoryUnit {
    state: Arc<Mutex<State>>,
    staged_pages: Vec<LandingPage>,
    staged_status: Option<(i64, WorkflowStatus)>,
}

#[async_trait]
impl GenerationUnit for MemoryUnit {
    async fn lock_workflow(&mut self, workflow_id: i64) -> Result<Option<Workflow>, AppError> {
        Ok(self.state.lock().unwrap().workflows.get(&workflow_id).cloned())
    }

    async fn templates_by_ids(&mut self, template_ids: &[i64]) -> Result<Vec<Template>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(template_ids
            .iter()
            .filter_map(|id| state.templates.get(id).cloned())
            .collect())
    }

    async fn existing_landing_page_template_ids(
        &mut self,
        workflow_id: i64,
        template_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .landing_pages
            .iter()
            .filter(|lp| lp.workflow_id == workflow_id && template_ids.contains(&lp.template_id))
            .map(|lp| lp.template_id)
            .collect())
    }

    async fn create_landing_page(&mut self, landing_page: NewLandingPage) -> Result<i64, AppError> {
        let id = {
            let mut state = self.state.lock().unwrap();
            let id = state.next_landing_page_id;
            state.next_landing_page_id += 1;
            id
        };
        self.staged_pages.push(LandingPage {
            id,
            workflow_id: landing_page.workflow_id,
            template_id: landing_page.template_id,
            selected_video_ids: landing_page.selected_video_ids,
            generated_page_url: String::new(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn set_landing_page_url(
        &mut self,
        landing_page_id: i64,
        url: &str,
    ) -> Result<(), AppError> {
        let page = self
            .staged_pages
            .iter_mut()
            .find(|lp| lp.id == landing_page_id)
            .ok_or_else(|| AppError::NotFound(format!("landing page {}", landing_page_id)))?;
        page.generated_page_url = url.to_string();
        Ok(())
    }

    async fn update_workflow_status(
        &mut self,
        workflow_id: i64,
        status: WorkflowStatus,
    ) -> Result<(), AppError> {
        self.staged_status = Some((workflow_id, status));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryUnit {
            state,
            staged_pages,
            staged_status,
        } = *self;
        let mut guard = state.lock().unwrap();
        guard.landing_pages.extend(staged_pages);
        if let Some((workflow_id, status)) = staged_status {
            if let Some(w) = guard.workflows.get_mut(&workflow_id) {
                w.status = status;
                w.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        Ok(())
    }
}

/// Temporary project checkout: `<tmp>/app` is the project root, so the repository root is
/// `<tmp>` itself.
pub struct TestProject {
    pub dir: TempDir,
    pub config: EngineConfig,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config = EngineConfig::from_project_root(dir.path().join("app"));
        std::fs::create_dir_all(&config.templates_root).expect("Failed to create templates root");
        Self { dir, config }
    }

    pub fn with_cleanup(mut self) -> Self {
        self.config.cleanup_on_failure = true;
        self
    }

    /// Write a template file below the templates root and return the relative path.
    pub fn write_template(&self, relative: &str, html: &str) -> String {
        let path = self.config.templates_root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create template dir");
        }
        std::fs::write(&path, html).expect("Failed to write template");
        relative.to_string()
    }

    pub fn generated_root(&self) -> &Path {
        &self.config.generated_root
    }

    /// Filesystem path of a served `/generated/...` URL.
    pub fn path_for_url(&self, url: &str) -> PathBuf {
        let rel = url
            .strip_prefix("/generated/")
            .expect("URL outside /generated");
        self.config.generated_root.join(rel)
    }
}

pub const SHELL_HTML: &str = r#"<html><head><link rel="stylesheet" href="./style.css"></head><body><div id="app"></div></body></html>"#;
