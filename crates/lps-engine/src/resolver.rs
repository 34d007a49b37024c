//! Template file resolution
//!
//! Template paths are stored exactly as an operator typed them, so the same string may be
//! absolute, relative to the project checkout, relative to the repository above it, or
//! relative to the templates directory. [`PathResolver`] tries an ordered list of
//! [`ResolveStrategy`] values and returns the first candidate that is a regular file.

use std::path::{Path, PathBuf};

use lps_core::config::EngineConfig;

use crate::error::{GenerationError, GenerationResult};

/// One way of turning a stored path into a filesystem candidate
pub trait ResolveStrategy: Send + Sync {
    /// Short label used in debug logs.
    fn name(&self) -> &'static str;

    /// The location this strategy would use for `raw`. Pure; no filesystem access.
    fn candidate(&self, raw: &Path) -> PathBuf;

    /// Return the candidate when `is_file` accepts it.
    fn try_resolve(&self, raw: &Path, is_file: &dyn Fn(&Path) -> bool) -> Option<PathBuf> {
        let candidate = self.candidate(raw);
        is_file(&candidate).then_some(candidate)
    }
}

/// The path taken as given (absolute, or relative to the process working directory).
pub struct AsGiven;

impl ResolveStrategy for AsGiven {
    fn name(&self) -> &'static str {
        "as_given"
    }

    fn candidate(&self, raw: &Path) -> PathBuf {
        raw.to_path_buf()
    }
}

/// The path joined under a fixed root.
pub struct UnderRoot {
    label: &'static str,
    root: PathBuf,
}

impl UnderRoot {
    pub fn new(label: &'static str, root: impl Into<PathBuf>) -> Self {
        Self {
            label,
            root: root.into(),
        }
    }
}

impl ResolveStrategy for UnderRoot {
    fn name(&self) -> &'static str {
        self.label
    }

    fn candidate(&self, raw: &Path) -> PathBuf {
        self.root.join(raw)
    }
}

/// Ordered resolver over [`ResolveStrategy`] values
pub struct PathResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl PathResolver {
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Standard priority: as given, project root, repository root, templates root.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(vec![
            Box::new(AsGiven),
            Box::new(UnderRoot::new("project_root", &config.project_root)),
            Box::new(UnderRoot::new("repo_root", &config.repo_root)),
            Box::new(UnderRoot::new("templates_root", &config.templates_root)),
        ])
    }

    /// Resolve against the real filesystem.
    pub fn resolve(&self, raw: &str) -> GenerationResult<PathBuf> {
        self.resolve_with(raw, &|p: &Path| p.is_file())
    }

    /// Resolve with a caller-supplied existence check.
    pub fn resolve_with(
        &self,
        raw: &str,
        is_file: &dyn Fn(&Path) -> bool,
    ) -> GenerationResult<PathBuf> {
        let raw_path = Path::new(raw);
        for strategy in &self.strategies {
            if let Some(found) = strategy.try_resolve(raw_path, is_file) {
                tracing::debug!(
                    raw = %raw,
                    strategy = strategy.name(),
                    resolved = %found.display(),
                    "Resolved template file"
                );
                return Ok(found);
            }
        }

        Err(GenerationError::TemplateFileNotFound {
            path: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn config_at(project_root: &Path) -> EngineConfig {
        EngineConfig::from_project_root(project_root)
    }

    #[test]
    fn test_priority_order_without_filesystem() {
        let config = config_at(Path::new("/srv/repo/app"));
        let resolver = PathResolver::from_config(&config);

        // Present under both repo root and templates root: repo root wins
        let present: HashSet<PathBuf> = [
            PathBuf::from("/srv/repo/shell/index.html"),
            PathBuf::from("/srv/repo/app/templates/shell/index.html"),
        ]
        .into_iter()
        .collect();
        let found = resolver
            .resolve_with("shell/index.html", &|p: &Path| present.contains(p))
            .unwrap();
        assert_eq!(found, PathBuf::from("/srv/repo/shell/index.html"));

        // Present only under the templates root
        let present: HashSet<PathBuf> = [PathBuf::from("/srv/repo/app/templates/hero.html")]
            .into_iter()
            .collect();
        let found = resolver
            .resolve_with("hero.html", &|p: &Path| present.contains(p))
            .unwrap();
        assert_eq!(found, PathBuf::from("/srv/repo/app/templates/hero.html"));
    }

    #[test]
    fn test_as_given_beats_project_root() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("app");
        fs::create_dir_all(project.join("templates")).unwrap();
        let absolute = dir.path().join("abs.html");
        fs::write(&absolute, "<html></html>").unwrap();

        let resolver = PathResolver::from_config(&config_at(&project));
        let found = resolver.resolve(absolute.to_str().unwrap()).unwrap();
        assert_eq!(found, absolute);
    }

    #[test]
    fn test_project_root_beats_repo_and_templates_roots() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("app");
        for base in [
            project.clone(),
            dir.path().to_path_buf(),
            project.join("templates"),
        ] {
            fs::create_dir_all(base.join("t1")).unwrap();
            fs::write(base.join("t1/index.html"), "x").unwrap();
        }

        let resolver = PathResolver::from_config(&config_at(&project));
        let found = resolver.resolve("t1/index.html").unwrap();
        assert_eq!(found, project.join("t1/index.html"));
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("app");
        fs::create_dir_all(project.join("templates/t2")).unwrap();

        let resolver = PathResolver::from_config(&config_at(&project));
        assert_matches!(
            resolver.resolve("t2"),
            Err(GenerationError::TemplateFileNotFound { path }) if path == "t2"
        );
    }

    #[test]
    fn test_missing_file_reports_original_string() {
        let dir = tempdir().unwrap();
        let resolver = PathResolver::from_config(&config_at(dir.path()));
        assert_matches!(
            resolver.resolve("templates/missing/index.html"),
            Err(GenerationError::TemplateFileNotFound { path })
                if path == "templates/missing/index.html"
        );
    }
}
