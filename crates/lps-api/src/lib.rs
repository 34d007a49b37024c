//! LPS API Library
//!
//! This crate provides the HTTP handlers, routing, and application setup for the landing
//! page service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
pub mod telemetry;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
