//! Storage error types.
//!
//! Used by the request-log repository and its callers.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
