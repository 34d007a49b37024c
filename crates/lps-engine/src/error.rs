//! Generation engine errors

use std::io;

use thiserror::Error;

use lps_core::error::AppError;
use lps_core::models::WorkflowStatus;

/// Failures of a generation or preview request
///
/// Every variant is a recoverable, caller-facing outcome. None of them leave a workflow
/// partially transitioned.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workflow {0} not found")]
    WorkflowNotFound(i64),

    #[error("Templates not found: {0:?}")]
    TemplatesNotFound(Vec<i64>),

    #[error("Workflow {workflow_id} is {status}, only draft workflows can be generated")]
    InvalidState {
        workflow_id: i64,
        status: WorkflowStatus,
    },

    #[error("Template {template_id} requires at least {required} videos, only {supplied} selected")]
    CapacityViolation {
        template_id: i64,
        supplied: usize,
        required: i32,
    },

    #[error("Workflow already has landing pages for templates {template_ids:?}")]
    DuplicateGeneration { template_ids: Vec<i64> },

    #[error("Template html file not found: {path}")]
    TemplateFileNotFound { path: String },

    #[error("Failed to read template html file {path}: {source}")]
    TemplateFileReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write generated html file {path}: {source}")]
    OutputWriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] AppError),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::InvalidInput(msg) => AppError::InvalidInput(msg),
            GenerationError::WorkflowNotFound(id) => {
                AppError::NotFound(format!("Workflow {} not found", id))
            }
            GenerationError::TemplatesNotFound(ids) => {
                AppError::NotFound(format!("Templates not found: {:?}", ids))
            }
            e @ GenerationError::InvalidState { .. } => AppError::InvalidState(e.to_string()),
            GenerationError::CapacityViolation {
                template_id,
                supplied,
                required,
            } => AppError::CapacityViolation {
                template_id,
                supplied,
                required,
            },
            GenerationError::DuplicateGeneration { template_ids } => {
                AppError::DuplicateGeneration { template_ids }
            }
            GenerationError::TemplateFileNotFound { path } => {
                AppError::TemplateFileNotFound { path }
            }
            GenerationError::TemplateFileReadError { path, source } => {
                AppError::TemplateFileReadError {
                    path,
                    message: source.to_string(),
                }
            }
            GenerationError::OutputWriteError { path, source } => AppError::OutputWriteError {
                path,
                message: source.to_string(),
            },
            GenerationError::Store(e) => e,
        }
    }
}
