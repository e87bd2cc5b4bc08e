// src/lib.rs

//! Recipe Server
//!
//! Loads a JSON document of recipe records into SQLite once, then serves
//! paginated listing and filtered search over HTTP.
//!
//! # Architecture
//!
//! - Database-first: all recipe state in SQLite, connections passed explicitly
//! - Loader: streaming, per-record fault-tolerant bulk ingestion
//! - Query service: rating-ordered paging and predicate-built search
//! - Server: thin axum adapter over the loader and query service

pub mod config;
pub mod db;
mod error;
pub mod loader;
pub mod query;
pub mod server;

pub use config::RecipesConfig;
pub use db::models::Recipe;
pub use error::{Error, Result};
pub use loader::{DocumentSource, LoadOutcome, LoadStatus, Loader, LoaderConfig};
pub use query::{PageRequest, RecipePage, SearchCriteria, SearchResults};
pub use server::{ServerConfig, ServerState};
