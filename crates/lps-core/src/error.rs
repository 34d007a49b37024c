//! Error types module
//!
//! This module provides the core error types used throughout LPS.
//! All errors are unified under the `AppError` enum, which covers database failures,
//! request validation, workflow lifecycle violations, and the filesystem failures of
//! landing-page generation. Every variant self-describes its HTTP presentation through
//! [`ErrorMetadata`].

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues or misconfigured records
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Template {template_id} requires at least {required} videos, {supplied} supplied")]
    CapacityViolation {
        template_id: i64,
        supplied: usize,
        required: i32,
    },

    #[error("Landing pages already exist in this workflow for templates {template_ids:?}")]
    DuplicateGeneration { template_ids: Vec<i64> },

    #[error("Template html file not found for path: {path}")]
    TemplateFileNotFound { path: String },

    #[error("Failed to read template html file {path}: {message}")]
    TemplateFileReadError { path: String, message: String },

    #[error("Failed to write generated html file {path}: {message}")]
    OutputWriteError { path: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidState(_) => (
            409,
            "INVALID_STATE",
            false,
            Some("Check the workflow status before retrying"),
            false,
            LogLevel::Debug,
        ),
        AppError::CapacityViolation { .. } => (
            422,
            "CAPACITY_VIOLATION",
            false,
            Some("Select at least as many videos as the template requires"),
            false,
            LogLevel::Debug,
        ),
        AppError::DuplicateGeneration { .. } => (
            409,
            "DUPLICATE_GENERATION",
            false,
            Some("Remove templates that already have a landing page in this workflow"),
            false,
            LogLevel::Debug,
        ),
        AppError::TemplateFileNotFound { .. } => (
            422,
            "TEMPLATE_FILE_NOT_FOUND",
            false,
            Some("Fix the template's html_file_path"),
            false,
            LogLevel::Warn,
        ),
        AppError::TemplateFileReadError { .. } => (
            500,
            "TEMPLATE_FILE_READ_ERROR",
            true,
            Some("Check template file permissions and encoding"),
            false,
            LogLevel::Error,
        ),
        AppError::OutputWriteError { .. } => (
            500,
            "OUTPUT_WRITE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidState(_) => "InvalidState",
            AppError::CapacityViolation { .. } => "CapacityViolation",
            AppError::DuplicateGeneration { .. } => "DuplicateGeneration",
            AppError::TemplateFileNotFound { .. } => "TemplateFileNotFound",
            AppError::TemplateFileReadError { .. } => "TemplateFileReadError",
            AppError::OutputWriteError { .. } => "OutputWriteError",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::InvalidState(ref msg) => msg.clone(),
            AppError::CapacityViolation {
                template_id,
                supplied,
                required,
            } => {
                format!(
                    "Template {} requires at least {} videos, only {} selected",
                    template_id, required, supplied
                )
            }
            AppError::DuplicateGeneration { template_ids } => {
                format!(
                    "Landing pages already exist in this workflow for templates {:?}, cannot generate again",
                    template_ids
                )
            }
            AppError::TemplateFileNotFound { path } => {
                format!("Template html file not found for path: {}", path)
            }
            AppError::TemplateFileReadError { path, .. } => {
                format!("Failed to read template html file: {}", path)
            }
            AppError::OutputWriteError { .. } => "Failed to write generated html file".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
