//! LPS database layer
//!
//! sqlx/Postgres repositories for the catalog entities and the transactional record store
//! used by the landing-page generation engine.

pub mod db;

pub use db::*;
