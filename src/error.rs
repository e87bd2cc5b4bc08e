// src/error.rs

//! Error types for the recipe server

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the loader, the query service and the database layer
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Reading the document source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The recipe document is not a well-formed JSON object
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database could not be initialized or migrated
    #[error("initialization error: {0}")]
    Init(String),

    /// A blocking task panicked or was cancelled
    #[error("task join error: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Join(err.to_string())
    }
}
