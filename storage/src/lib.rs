//! Storage crate: request-log persistence (prompt/result pairs) and aggregate statistics.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – PromptRecord, ResultRecord, RequestStats
//! - [`request_log_repo`] – RequestLogRepository (SQLite)
//! - `sqlite_pool` – SQLite connection pool (internal)
//!
//! ## Features
//!
//! - `test-utils` – row lookups by id and by chat, for asserting on stored records in tests

mod error;
mod models;
mod request_log_repo;
mod sqlite_pool;


pub use error::StorageError;
pub use models::{PromptRecord, RequestStats, ResultRecord};
pub use request_log_repo::RequestLogRepository;
