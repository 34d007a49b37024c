//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use lps_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LPS API",
        version = "0.1.0",
        description = "Landing page service: register templates and videos, batch them into workflows, and generate static landing pages under /generated."
    ),
    paths(
        // Health
        handlers::health::health_check,
        handlers::health::db_check,
        // Workflows
        handlers::workflows::list_workflows,
        handlers::workflows::create_workflow,
        handlers::workflows::get_workflow,
        handlers::workflows::generate_landing_pages,
        handlers::workflows::preview_landing_page,
        handlers::workflows::archive_workflow,
        handlers::workflows::delete_workflow,
        // Templates
        handlers::templates::list_templates,
        handlers::templates::create_template,
        handlers::templates::get_template,
        handlers::templates::update_template,
        handlers::templates::delete_template,
        handlers::templates::preview_template,
        // Videos
        handlers::videos::list_videos,
        handlers::videos::create_video,
        handlers::videos::get_video,
        handlers::videos::update_video,
        handlers::videos::delete_video,
    ),
    components(
        schemas(
            models::Template,
            models::Video,
            models::WorkflowStatus,
            models::LandingPageSummary,
            handlers::health::HealthResponse,
            handlers::health::DbCheckResponse,
            handlers::workflows::CreateWorkflowRequest,
            handlers::workflows::GenerateLandingPagesRequest,
            handlers::workflows::PreviewLandingPageRequest,
            handlers::workflows::WorkflowResponse,
            handlers::workflows::WorkflowListItem,
            handlers::workflows::WorkflowListResponse,
            handlers::workflows::WorkflowDetailResponse,
            handlers::workflows::GenerateLandingPagesResponse,
            handlers::workflows::PreviewResponse,
            handlers::templates::TemplateRequest,
            handlers::templates::TemplateListResponse,
            handlers::videos::VideoRequest,
            handlers::videos::VideoListResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and database checks"),
        (name = "workflows", description = "Workflow batches, landing page generation, and previews"),
        (name = "templates", description = "Landing page templates"),
        (name = "videos", description = "Video catalog"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_generation_and_preview_paths() {
        let spec = get_openapi_spec();
        let paths = &spec.paths.paths;
        assert!(paths.contains_key("/api/workflows/{id}/generate"));
        assert!(paths.contains_key("/api/workflows/preview"));
        assert!(paths.contains_key("/api/templates/{id}/preview"));
        assert!(paths.contains_key("/db-check"));
    }
}
