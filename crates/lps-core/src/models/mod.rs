//! Data models for the application
//!
//! Each sub-module holds the records of one entity: the reusable page templates, the
//! video catalog, the workflow batches, and the landing pages generated inside them.

mod landing_page;
mod template;
mod video;
mod workflow;

// Re-export all models for convenient imports
pub use landing_page::*;
pub use template::*;
pub use video::*;
pub use workflow::*;
