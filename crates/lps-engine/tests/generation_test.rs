//! Generation orchestrator tests against the in-memory store and a temporary project.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use helpers::{MemoryStore, TestProject, SHELL_HTML};
use lps_core::models::WorkflowStatus;
use lps_engine::{GenerateRequest, GenerationError, GenerationService};

fn service(store: &MemoryStore, project: &TestProject) -> GenerationService {
    GenerationService::new(Arc::new(store.clone()), &project.config)
}

fn request(workflow_id: i64, video_ids: &[i64], template_ids: &[i64]) -> GenerateRequest {
    GenerateRequest {
        workflow_id,
        video_ids: video_ids.to_vec(),
        template_ids: template_ids.to_vec(),
    }
}

fn injected_ids(page: &str) -> Vec<i64> {
    let open = r#"<script id="lps-selected-videos" type="application/json">"#;
    let start = page.find(open).unwrap() + open.len();
    let end = start + page[start..].find("</script>").unwrap();
    serde_json::from_str(&page[start..end]).unwrap()
}

#[tokio::test]
async fn test_end_to_end_two_templates() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(100, &project.write_template("a/index.html", SHELL_HTML), 1);
    store.add_template(200, &project.write_template("b/index.html", SHELL_HTML), 2);

    let outcome = service(&store, &project)
        .generate(request(1, &[10, 20, 30], &[100, 200]))
        .await
        .unwrap();

    assert_eq!(outcome.workflow_id, 1);
    assert_eq!(outcome.landing_pages.len(), 2);
    assert_eq!(outcome.landing_pages[0].template_id, 100);
    assert_eq!(outcome.landing_pages[0].selected_video_ids, vec![10]);
    assert_eq!(outcome.landing_pages[1].template_id, 200);
    assert_eq!(outcome.landing_pages[1].selected_video_ids, vec![10, 20]);
    assert_ne!(
        outcome.landing_pages[0].generated_page_url,
        outcome.landing_pages[1].generated_page_url
    );

    assert_eq!(store.workflow_status(1), Some(WorkflowStatus::PendingAd));
    let stored = store.landing_pages(1);
    assert_eq!(stored.len(), 2);

    for summary in &outcome.landing_pages {
        assert_eq!(
            summary.generated_page_url,
            format!("/generated/1/{}.html", summary.id)
        );
        let record = stored.iter().find(|lp| lp.id == summary.id).unwrap();
        assert_eq!(record.generated_page_url, summary.generated_page_url);

        let page = std::fs::read_to_string(project.path_for_url(&summary.generated_page_url)).unwrap();
        assert!(page.contains(r#"href="/templates/style.css""#));
        assert_eq!(injected_ids(&page), summary.selected_video_ids);
    }
}

#[tokio::test]
async fn test_capacity_violation_names_template_and_shortfall() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(7, &project.write_template("big.html", SHELL_HTML), 3);

    let err = service(&store, &project)
        .generate(request(1, &[1, 2], &[7]))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        GenerationError::CapacityViolation {
            template_id: 7,
            supplied: 2,
            required: 3
        }
    );
    assert!(store.landing_pages(1).is_empty());
    assert_eq!(store.workflow_status(1), Some(WorkflowStatus::Draft));
}

#[tokio::test]
async fn test_second_generation_is_rejected_without_new_pages() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(5, &project.write_template("one.html", SHELL_HTML), 1);
    let service = service(&store, &project);

    service.generate(request(1, &[9], &[5])).await.unwrap();
    let err = service.generate(request(1, &[9], &[5])).await.unwrap_err();

    // The workflow left draft on the first call
    assert_matches!(
        err,
        GenerationError::InvalidState {
            workflow_id: 1,
            status: WorkflowStatus::PendingAd
        }
    );
    assert_eq!(store.landing_pages(1).len(), 1);
}

#[tokio::test]
async fn test_duplicate_generation_lists_sorted_template_ids() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    let path = project.write_template("one.html", SHELL_HTML);
    for id in [3, 8, 5] {
        store.add_template(id, &path, 1);
    }

    // Pages for 8 and 3 already exist under a workflow that is back in draft
    let service = service(&store, &project);
    service.generate(request(1, &[1], &[8, 3])).await.unwrap();
    store.add_workflow(1, WorkflowStatus::Draft);

    let err = service
        .generate(request(1, &[1], &[5, 8, 3]))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        GenerationError::DuplicateGeneration { template_ids } if template_ids == vec![3, 8]
    );
    assert_eq!(store.landing_pages(1).len(), 2);
    assert_eq!(store.workflow_status(1), Some(WorkflowStatus::Draft));
}

#[tokio::test]
async fn test_pending_ad_workflow_rejected() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(2, WorkflowStatus::PendingAd);
    store.add_template(1, &project.write_template("t.html", SHELL_HTML), 1);

    let err = service(&store, &project)
        .generate(request(2, &[1], &[1]))
        .await
        .unwrap_err();

    assert_matches!(err, GenerationError::InvalidState { workflow_id: 2, .. });
    assert!(store.landing_pages(2).is_empty());
    assert_eq!(store.workflow_status(2), Some(WorkflowStatus::PendingAd));
}

#[tokio::test]
async fn test_precondition_order() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_workflow(2, WorkflowStatus::Ready);
    store.add_template(1, &project.write_template("t.html", SHELL_HTML), 5);
    let service = service(&store, &project);

    assert_matches!(
        service.generate(request(99, &[1], &[1])).await,
        Err(GenerationError::WorkflowNotFound(99))
    );
    // State is checked before templates exist
    assert_matches!(
        service.generate(request(2, &[1], &[404])).await,
        Err(GenerationError::InvalidState { .. })
    );
    // Existence is checked before capacity
    assert_matches!(
        service.generate(request(1, &[1], &[1, 404, 405, 404])).await,
        Err(GenerationError::TemplatesNotFound(ids)) if ids == vec![404, 405]
    );
    assert_matches!(
        service.generate(request(1, &[], &[1])).await,
        Err(GenerationError::InvalidInput(_))
    );
    assert_matches!(
        service.generate(request(1, &[1], &[])).await,
        Err(GenerationError::InvalidInput(_))
    );
}

#[tokio::test]
async fn test_duplicate_template_ids_are_collapsed() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(4, &project.write_template("t.html", SHELL_HTML), 1);

    let outcome = service(&store, &project)
        .generate(request(1, &[6, 7], &[4, 4, 4]))
        .await
        .unwrap();

    assert_eq!(outcome.landing_pages.len(), 1);
    assert_eq!(store.landing_pages(1).len(), 1);
}

#[tokio::test]
async fn test_failure_mid_batch_rolls_back_and_keeps_files() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(1, &project.write_template("ok.html", SHELL_HTML), 1);
    store.add_template(2, "missing/index.html", 1);

    let err = service(&store, &project)
        .generate(request(1, &[10], &[1, 2]))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        GenerationError::TemplateFileNotFound { path } if path == "missing/index.html"
    );
    assert!(store.landing_pages(1).is_empty());
    assert_eq!(store.workflow_status(1), Some(WorkflowStatus::Draft));

    // The first template's file stays behind
    let workflow_dir = project.generated_root().join("1");
    assert_eq!(std::fs::read_dir(&workflow_dir).unwrap().count(), 1);
}

#[tokio::test]
async fn test_failure_mid_batch_removes_files_when_cleanup_enabled() {
    let project = TestProject::new().with_cleanup();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    store.add_template(1, &project.write_template("ok.html", SHELL_HTML), 1);
    store.add_template(2, "missing/index.html", 1);

    let result = service(&store, &project)
        .generate(request(1, &[10], &[1, 2]))
        .await;

    assert_matches!(result, Err(GenerationError::TemplateFileNotFound { .. }));
    assert!(store.landing_pages(1).is_empty());
    let workflow_dir = project.generated_root().join("1");
    assert_eq!(std::fs::read_dir(&workflow_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_static_assets_prefix_applied_per_template() {
    let project = TestProject::new();
    let store = MemoryStore::new();
    store.add_workflow(1, WorkflowStatus::Draft);
    let html = project.write_template("summer/index.html", SHELL_HTML);
    let assets = project.config.templates_root.join("summer");
    store.add_template_with_assets(1, &html, 1, assets.to_str());
    store.add_template_with_assets(2, &html, 1, Some("/elsewhere/assets"));

    let outcome = service(&store, &project)
        .generate(request(1, &[3], &[1, 2]))
        .await
        .unwrap();

    let first = std::fs::read_to_string(project.path_for_url(&outcome.landing_pages[0].generated_page_url)).unwrap();
    assert!(first.contains(r#"href="/templates/summer/style.css""#));
    let second = std::fs::read_to_string(project.path_for_url(&outcome.landing_pages[1].generated_page_url)).unwrap();
    assert!(second.contains(r#"href="/templates/style.css""#));
}
