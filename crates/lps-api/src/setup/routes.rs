//! Route configuration and setup

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use lps_core::constants::{GENERATED_URL_ROOT, TEMPLATES_URL_ROOT};
use lps_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::constants::API_PREFIX;
use crate::handlers::{health, templates, videos, workflows};
use crate::state::AppState;

const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 1_024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_HTTP_CONCURRENCY_LIMIT)
        .max(1);

    let mut app = Router::new()
        .merge(public_routes())
        .nest(API_PREFIX, api_routes())
        .nest_service(
            GENERATED_URL_ROOT,
            ServeDir::new(&state.engine.config.generated_root),
        );

    let templates_root = &state.engine.config.templates_root;
    if templates_root.is_dir() {
        app = app.nest_service(TEMPLATES_URL_ROOT, ServeDir::new(templates_root));
    } else {
        tracing::warn!(
            templates_root = %templates_root.display(),
            "Templates root does not exist, template assets will not be served"
        );
    }

    let app = app
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/db-check", get(health::db_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Workflows
        .route(
            "/workflows",
            get(workflows::list_workflows).post(workflows::create_workflow),
        )
        .route("/workflows/preview", post(workflows::preview_landing_page))
        .route(
            "/workflows/{id}",
            get(workflows::get_workflow).delete(workflows::delete_workflow),
        )
        .route(
            "/workflows/{id}/generate",
            post(workflows::generate_landing_pages),
        )
        .route("/workflows/{id}/archive", post(workflows::archive_workflow))
        // Templates
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/{id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/templates/{id}/preview", get(templates::preview_template))
        // Videos
        .route("/videos", get(videos::list_videos).post(videos::create_video))
        .route(
            "/videos/{id}",
            get(videos::get_video)
                .put(videos::update_video)
                .delete(videos::delete_video),
        )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        // Credentials cannot be combined with a wildcard header list
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    };
    Ok(cors)
}
