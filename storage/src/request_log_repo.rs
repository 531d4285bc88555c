//! Request-log repository: persistence of prompt/result pairs and aggregate queries.
//!
//! Uses SqlitePoolManager and the models (PromptRecord, ResultRecord, RequestStats).
//! External: SQLite via sqlx; the bot uses save/get_stats. The row lookups are compiled for tests
//! and the `test-utils` feature only.

use crate::error::StorageError;
use crate::models::{PromptRecord, RequestStats, ResultRecord};
use crate::sqlite_pool::SqlitePoolManager;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[derive(Clone)]
pub struct RequestLogRepository {
    pool_manager: SqlitePoolManager,
}

impl RequestLogRepository {
    /// Opens (or creates) the database at `db_filepath` and migrates its tables.
    pub async fn new(db_filepath: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(db_filepath).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating request log tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                username TEXT NOT NULL,
                text TEXT NOT NULL,
                tokens INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS results (
                id TEXT PRIMARY KEY,
                prompt_id TEXT NOT NULL UNIQUE REFERENCES prompts(id),
                successful INTEGER NOT NULL,
                text TEXT NOT NULL,
                tokens INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_prompts_chat_id ON prompts(chat_id);
            CREATE INDEX IF NOT EXISTS idx_prompts_tokens ON prompts(tokens);
            CREATE INDEX IF NOT EXISTS idx_results_successful ON results(successful);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Request log tables created successfully");
        Ok(())
    }

    /// Saves a prompt and its result in one transaction, so no prompt is left without a result.
    pub async fn save(
        &self,
        prompt: &PromptRecord,
        result: &ResultRecord,
    ) -> Result<(), StorageError> {
        if result.prompt_id != prompt.id {
            return Err(StorageError::InvalidRecord(format!(
                "result {} belongs to prompt {}, not {}",
                result.id, result.prompt_id, prompt.id
            )));
        }

        let mut tx = self.pool_manager.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO prompts (id, chat_id, user_id, username, text, tokens, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&prompt.id)
        .bind(prompt.chat_id)
        .bind(prompt.user_id)
        .bind(&prompt.username)
        .bind(&prompt.text)
        .bind(prompt.tokens)
        .bind(prompt.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO results (id, prompt_id, successful, text, tokens, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&result.id)
        .bind(&result.prompt_id)
        .bind(result.successful)
        .bind(&result.text)
        .bind(result.tokens)
        .bind(result.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            prompt_id = %prompt.id,
            chat_id = prompt.chat_id,
            successful = result.successful,
            prompt_tokens = prompt.tokens,
            result_tokens = result.tokens,
            "Saved prompt and result"
        );
        Ok(())
    }

    pub async fn get_stats(&self) -> Result<RequestStats, StorageError> {
        let pool = self.pool_manager.pool();

        let (since,): (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MIN(created_at) FROM prompts")
                .fetch_one(pool)
                .await?;

        let (total_prompts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prompts")
            .fetch_one(pool)
            .await?;

        let (chats,): (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT chat_id) FROM prompts")
            .fetch_one(pool)
            .await?;

        let (prompts, prompt_tokens): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(tokens), 0) FROM prompts WHERE tokens > 0",
        )
        .fetch_one(pool)
        .await?;

        let (completions, completion_tokens): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(tokens), 0) FROM results WHERE successful = 1",
        )
        .fetch_one(pool)
        .await?;

        let (errors,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM results WHERE successful = 0")
                .fetch_one(pool)
                .await?;

        Ok(RequestStats {
            since,
            total_prompts,
            chats,
            prompts,
            prompt_tokens,
            completions,
            completion_tokens,
            errors,
        })
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub async fn get_prompt_by_id(
        &self,
        prompt_id: &str,
    ) -> Result<Option<PromptRecord>, StorageError> {
        let prompt = sqlx::query_as::<_, PromptRecord>("SELECT * FROM prompts WHERE id = ?")
            .bind(prompt_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(prompt)
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub async fn get_result_by_prompt_id(
        &self,
        prompt_id: &str,
    ) -> Result<Option<ResultRecord>, StorageError> {
        let result =
            sqlx::query_as::<_, ResultRecord>("SELECT * FROM results WHERE prompt_id = ?")
                .bind(prompt_id)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        Ok(result)
    }

    /// Most recent prompts of a chat, newest first.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn get_recent_prompts_by_chat(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<PromptRecord>, StorageError> {
        let prompts = sqlx::query_as::<_, PromptRecord>(
            "SELECT * FROM prompts WHERE chat_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        debug!(count = prompts.len(), chat_id, "Retrieved recent prompts");
        Ok(prompts)
    }
}
