//! Landing page generation engine
//!
//! Turns a template's HTML shell and an ordered video selection into a deployable static
//! page. [`resolver`] locates template files, [`rewriter`] performs the textual rewrite,
//! [`generation`] coordinates a batch against a workflow inside one record-store unit of
//! work, and [`preview`] renders one-off pages that are never persisted.

pub mod error;
pub mod generation;
pub mod output;
pub mod preview;
pub mod renderer;
pub mod resolver;
pub mod rewriter;

pub use error::{GenerationError, GenerationResult};
pub use generation::{GenerateRequest, GenerationOutcome, GenerationService};
pub use output::{OutputWriter, WrittenPage};
pub use preview::{PreviewOutcome, PreviewService};
pub use renderer::PageRenderer;
pub use resolver::{PathResolver, ResolveStrategy};
pub use rewriter::{rewrite_page, static_prefix};
