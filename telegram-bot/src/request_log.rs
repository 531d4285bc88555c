//! Request log: optional persistence of prompt/result pairs and the `/stats` summary.
//!
//! When no database is configured (or it cannot be opened) the log is disabled: saves are
//! no-ops and the stats message says so.

use chrono::Local;
use storage::{PromptRecord, RequestLogRepository, RequestStats, ResultRecord};
use tracing::{debug, error, info};

pub const MSG_DATABASE_NOT_CONFIGURED: &str =
    "Database not configured. Set `db_filepath` in your config file.";
pub const MSG_DATABASE_EMPTY: &str = "Database is empty.";
pub const MSG_STATS_FAILED: &str =
    "Failed to retrieve stats. See the server logs for more information.";

/// One prompt and the outcome of answering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: String,
    pub prompt: String,
    pub prompt_tokens: u32,
    pub result: String,
    pub result_tokens: u32,
    pub successful: bool,
}

#[derive(Clone, Default)]
pub struct RequestLog {
    repo: Option<RequestLogRepository>,
}

impl RequestLog {
    pub fn disabled() -> Self {
        Self { repo: None }
    }

    pub fn new(repo: RequestLogRepository) -> Self {
        Self { repo: Some(repo) }
    }

    /// Opens the database at `db_filepath`. A failure is logged and yields a disabled log.
    pub async fn open(db_filepath: Option<&str>) -> Self {
        let Some(path) = db_filepath.filter(|p| !p.trim().is_empty()) else {
            info!("request log disabled: no db_filepath configured");
            return Self::disabled();
        };

        match RequestLogRepository::new(path).await {
            Ok(repo) => {
                info!(db_filepath = %path, "request log opened");
                Self::new(repo)
            }
            Err(e) => {
                error!(error = %e, db_filepath = %path, "failed to open request logs db");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.repo.is_some()
    }

    /// Persists `entry`. Failures are logged, never returned.
    pub async fn save(&self, entry: RequestLogEntry) {
        let Some(repo) = &self.repo else {
            return;
        };

        let prompt = PromptRecord::new(
            entry.chat_id,
            entry.user_id,
            entry.username,
            entry.prompt,
            entry.prompt_tokens,
        );
        let result =
            ResultRecord::for_prompt(&prompt, entry.successful, entry.result, entry.result_tokens);

        match repo.save(&prompt, &result).await {
            Ok(()) => debug!(prompt_id = %prompt.id, successful = result.successful, "request logged"),
            Err(e) => error!(error = %e, "failed to save prompt & result to database"),
        }
    }

    /// The `/stats` reply (HTML).
    pub async fn stats_message(&self) -> String {
        let Some(repo) = &self.repo else {
            return MSG_DATABASE_NOT_CONFIGURED.to_string();
        };

        match repo.get_stats().await {
            Ok(stats) if stats.is_empty() => MSG_DATABASE_EMPTY.to_string(),
            Ok(stats) => format_stats(&stats),
            Err(e) => {
                error!(error = %e, "failed to retrieve stats");
                MSG_STATS_FAILED.to_string()
            }
        }
    }
}

/// Renders stats; the first-prompt timestamp is shown in local time.
pub fn format_stats(stats: &RequestStats) -> String {
    let mut lines = Vec::new();
    if let Some(since) = stats.since {
        lines.push(format!(
            "Since <i>{}</i>",
            since.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ));
        lines.push(String::new());
    }
    lines.push(format!("* Chats: <b>{}</b>", stats.chats));
    lines.push(format!(
        "* Prompts: <b>{}</b> (Total tokens: <b>{}</b>)",
        stats.prompts, stats.prompt_tokens
    ));
    lines.push(format!(
        "* Completions: <b>{}</b> (Total tokens: <b>{}</b>)",
        stats.completions, stats.completion_tokens
    ));
    lines.push(format!("* Errors: <b>{}</b>", stats.errors));
    lines.join("\n")
}
