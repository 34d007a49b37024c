//! Configuration module
//!
//! This module provides the configuration structures for the API server and the
//! landing-page generation engine. Configuration is loaded once at startup and then
//! passed around explicitly; the engine only ever sees an [`EngineConfig`] value.

use std::env;
use std::path::{Path, PathBuf};

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:5173,http://localhost:5173";

/// Base configuration shared by the HTTP layer
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub api_version: String,
}

/// Filesystem roots and policies for the generation engine.
///
/// Built explicitly by the caller so tests can point every root at a temporary directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root of the project checkout; template paths are commonly entered relative to it.
    pub project_root: PathBuf,
    /// One level above the project root.
    pub repo_root: PathBuf,
    /// Directory holding template HTML and static assets, served under `/templates`.
    pub templates_root: PathBuf,
    /// Directory receiving generated pages and previews, served under `/generated`.
    pub generated_root: PathBuf,
    /// Delete files written by a generation batch that was rolled back.
    pub cleanup_on_failure: bool,
}

impl EngineConfig {
    /// Derive the standard layout from a project root: `templates/` and `generated/`
    /// directly below it, repository root one level above.
    ///
    /// A relative root is made absolute against the current directory first, so the
    /// repository root is always a real parent.
    pub fn from_project_root(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let project_root = std::path::absolute(&project_root).unwrap_or(project_root);
        let repo_root = project_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_root.clone());
        Self {
            templates_root: project_root.join("templates"),
            generated_root: project_root.join("generated"),
            repo_root,
            project_root,
            cleanup_on_failure: false,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database_url: String,
    pub engine: EngineConfig,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "local".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            api_version: lookup("API_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        };

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: DATABASE_URL"))?;

        let project_root = match lookup("LPS_PROJECT_ROOT") {
            Some(root) => PathBuf::from(root),
            None => env::current_dir()
                .map_err(|e| anyhow::anyhow!("Failed to determine current directory: {}", e))?,
        };
        let mut engine = EngineConfig::from_project_root(project_root);
        if let Some(templates_root) = lookup("LPS_TEMPLATES_ROOT") {
            engine.templates_root = PathBuf::from(templates_root);
        }
        if let Some(generated_root) = lookup("LPS_GENERATED_ROOT") {
            engine.generated_root = PathBuf::from(generated_root);
        }
        engine.cleanup_on_failure = lookup("GENERATION_CLEANUP_ON_FAILURE")
            .map(|v| v.to_lowercase())
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Ok(Config {
            base,
            database_url,
            engine,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn api_version(&self) -> &str {
        &self.base.api_version
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone()
    }
}
