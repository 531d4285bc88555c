//! SQLite connection pool wrapper for the storage crate.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database file path.
    ///
    /// One connection: the engine serializes writes anyway and the bot handles updates serially.
    pub async fn new(db_filepath: &str) -> Result<Self, sqlx::Error> {
        info!(db_filepath = %db_filepath, "Initializing SQLite pool");

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .foreign_keys(true)
            .filename(db_filepath);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
