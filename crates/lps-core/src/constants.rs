//! URL and filesystem naming conventions shared by the engine and the HTTP layer.

/// URL root under which generated landing pages and previews are served.
pub const GENERATED_URL_ROOT: &str = "/generated";

/// URL root under which template static assets are served (mirrors the templates directory).
pub const TEMPLATES_URL_ROOT: &str = "/templates";

/// Subdirectory of the generated root holding previews.
pub const PREVIEW_DIR: &str = "preview";

/// Element id of the injected selected-videos script tag.
pub const SELECTED_VIDEOS_SCRIPT_ID: &str = "lps-selected-videos";

/// Default `created_by` for workflows created without an explicit creator.
pub const DEFAULT_CREATOR: &str = "system";

/// Default status for newly registered templates and videos.
pub const DEFAULT_RECORD_STATUS: &str = "active";
