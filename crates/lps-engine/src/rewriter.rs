//! Textual page rewriting
//!
//! No HTML parsing happens here: relative asset references are rewritten by plain substring
//! replacement and the selected video ids are injected as a JSON script tag.

use std::path::{Component, Path, PathBuf};

use lps_core::constants::{SELECTED_VIDEOS_SCRIPT_ID, TEMPLATES_URL_ROOT};

const BODY_CLOSE: &str = "</body>";

/// URL prefix under which a template's static assets are served.
///
/// `static_assets_path` may be absolute (must then lie inside `templates_root`) or relative
/// to `templates_root`. Anything that cannot be expressed below the templates root falls
/// back to the bare templates prefix instead of failing.
pub fn static_prefix(static_assets_path: Option<&str>, templates_root: &Path) -> String {
    let Some(assets) = static_assets_path.filter(|s| !s.is_empty()) else {
        return TEMPLATES_URL_ROOT.to_string();
    };

    match relative_to_templates(Path::new(assets), templates_root) {
        Some(rel) if !rel.is_empty() => format!("{}/{}", TEMPLATES_URL_ROOT, rel),
        _ => {
            if Path::new(assets).is_absolute() {
                tracing::debug!(
                    static_assets_path = %assets,
                    templates_root = %templates_root.display(),
                    "Static assets path outside templates root, using default prefix"
                );
            }
            TEMPLATES_URL_ROOT.to_string()
        }
    }
}

/// Slash-joined path of `assets` below `templates_root`, or `None` if it escapes.
fn relative_to_templates(assets: &Path, templates_root: &Path) -> Option<String> {
    let rel: PathBuf = if assets.is_absolute() {
        assets.strip_prefix(templates_root).ok()?.to_path_buf()
    } else {
        assets.to_path_buf()
    };

    let mut parts: Vec<String> = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

/// The `<script>` tag carrying the ordered selection as a JSON array.
pub fn selected_videos_tag(video_ids: &[i64]) -> String {
    // Serialising a slice of integers cannot fail
    let json = serde_json::to_string(video_ids).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"<script id="{}" type="application/json">{}</script>"#,
        SELECTED_VIDEOS_SCRIPT_ID, json
    )
}

/// Rewrite a template into a deployable page.
///
/// Every `href="./` and `src="./` becomes `href="<prefix>/` / `src="<prefix>/` (single pass),
/// then the selection tag is inserted before the first `</body>`, or appended when the
/// document has none.
pub fn rewrite_page(html: &str, prefix: &str, video_ids: &[i64]) -> String {
    let mut page = html
        .replace(r#"href="./"#, &format!(r#"href="{}/"#, prefix))
        .replace(r#"src="./"#, &format!(r#"src="{}/"#, prefix));

    let tag = selected_videos_tag(video_ids);
    match page.find(BODY_CLOSE) {
        Some(idx) => page.insert_str(idx, &format!("{}\n", tag)),
        None => page.push_str(&tag),
    }
    page
}
