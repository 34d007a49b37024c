//! LPS Core Library
//!
//! This crate provides the domain models, error types, configuration, and record-store
//! traits shared by every LPS component (database layer, generation engine, HTTP API).

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::{Config, EngineConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use store::{GenerationStore, GenerationUnit};
