//! Settings: the JSON config file, deserialized once at startup and immutable afterwards.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::core::{BotError, Result};

/// Completion request timeout used when the config does not set one.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;

/// Remote secret store (Infisical) descriptor. Key paths name where each credential lives,
/// e.g. `/telegram/BOT_TOKEN` (folder `/telegram`, secret `BOT_TOKEN`).
#[derive(Debug, Clone, Deserialize)]
pub struct InfisicalSettings {
    pub workspace_id: String,
    pub token: String,
    pub environment: String,
    #[serde(default = "default_secret_type")]
    pub secret_type: String,
    pub telegram_bot_token_key_path: String,
    pub openai_api_key_key_path: String,
    #[serde(default)]
    pub openai_org_id_key_path: Option<String>,
    /// API key for end-to-end-encrypted projects.
    #[serde(default)]
    pub e2ee_api_key: Option<String>,
    /// Override of the Infisical API base URL (self-hosted instances).
    #[serde(default)]
    pub api_url: Option<String>,
}

fn default_secret_type() -> String {
    "shared".to_string()
}

/// Bot settings as read from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // telegram bot api
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_api_url: Option<String>,

    // openai api
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub openai_org_id: Option<String>,
    #[serde(default)]
    pub openai_model: Option<String>,
    #[serde(default)]
    pub openai_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    // request logs
    #[serde(default)]
    pub db_filepath: Option<String>,

    // other configurations
    #[serde(default)]
    pub allowed_telegram_users: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub log_filepath: Option<String>,

    // secret manager
    #[serde(default)]
    pub infisical: Option<InfisicalSettings>,
}

impl Settings {
    /// Reads and parses the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BotError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| BotError::Config(format!("{} ({})", e, path.display())))
    }

    /// Parses settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BotError::Config(format!("Failed to parse: {}", e)))
    }

    /// Checks settings before anything is started. An empty allow-list is only warned about.
    pub fn validate(&self) -> Result<()> {
        if self.infisical.is_none() {
            if is_blank(&self.telegram_bot_token) {
                return Err(BotError::Config(
                    "`telegram_bot_token` is required when `infisical` is not set".into(),
                ));
            }
            if is_blank(&self.openai_api_key) {
                return Err(BotError::Config(
                    "`openai_api_key` is required when `infisical` is not set".into(),
                ));
            }
        }

        let urls = [
            ("telegram_api_url", self.telegram_api_url.as_deref()),
            ("openai_base_url", self.openai_base_url.as_deref()),
            (
                "infisical.api_url",
                self.infisical.as_ref().and_then(|i| i.api_url.as_deref()),
            ),
        ];
        for (key, url) in urls {
            if let Some(url) = url {
                if reqwest::Url::parse(url).is_err() {
                    return Err(BotError::Config(format!(
                        "`{}` is set but not a valid URL: {}",
                        key, url
                    )));
                }
            }
        }

        if self.request_timeout_seconds == Some(0) {
            return Err(BotError::Config(
                "`request_timeout_seconds` must be greater than zero".into(),
            ));
        }

        if self.allowed_telegram_users.is_empty() {
            warn!("`allowed_telegram_users` is empty; every message will be rejected");
        }

        Ok(())
    }

    /// Allowed handles, without a leading `@`.
    pub fn allowed_users(&self) -> HashSet<String> {
        self.allowed_telegram_users
            .iter()
            .map(|u| u.trim().trim_start_matches('@').to_string())
            .filter(|u| !u.is_empty())
            .collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
