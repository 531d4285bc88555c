//! Credential resolution: the bot token and OpenAI keys either come straight from the config
//! file ([`StaticCredentials`]) or are fetched from Infisical ([`InfisicalCredentials`]).

use async_trait::async_trait;
use openai_client::mask_token;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::settings::{InfisicalSettings, Settings};
use crate::core::{BotError, Result};

pub const DEFAULT_INFISICAL_API_URL: &str = "https://app.infisical.com";

const SECRET_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved credentials. `Debug` masks every value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_bot_token", &mask_token(&self.telegram_bot_token))
            .field("openai_api_key", &mask_token(&self.openai_api_key))
            .field(
                "openai_org_id",
                &self.openai_org_id.as_deref().map(mask_token),
            )
            .finish()
    }
}

/// Source of [`Credentials`], resolved once at startup.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn credentials(&self) -> Result<Credentials>;
}

/// Credentials taken verbatim from the config file.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Fails when the bot token or the API key is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let telegram_bot_token = non_blank(settings.telegram_bot_token.as_deref())
            .ok_or_else(|| BotError::Config("`telegram_bot_token` is not set".into()))?;
        let openai_api_key = non_blank(settings.openai_api_key.as_deref())
            .ok_or_else(|| BotError::Config("`openai_api_key` is not set".into()))?;

        Ok(Self::new(Credentials {
            telegram_bot_token,
            openai_api_key,
            openai_org_id: non_blank(settings.openai_org_id.as_deref()),
        }))
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn credentials(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

/// Fetches each credential as a raw secret from the Infisical API.
pub struct InfisicalCredentials {
    settings: InfisicalSettings,
    api_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct RawSecretResponse {
    secret: RawSecret,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSecret {
    secret_value: String,
}

impl InfisicalCredentials {
    pub fn new(settings: InfisicalSettings) -> Result<Self> {
        let api_url = settings
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_INFISICAL_API_URL)
            .trim_end_matches('/')
            .to_string();
        let http = reqwest::Client::builder()
            .timeout(SECRET_FETCH_TIMEOUT)
            .build()
            .map_err(|e| BotError::Secret(e.to_string()))?;

        Ok(Self {
            settings,
            api_url,
            http,
        })
    }

    /// Reads one secret at `key_path` (`/folder/NAME`).
    pub async fn fetch_secret(&self, key_path: &str) -> Result<String> {
        let (secret_path, secret_name) = split_key_path(key_path);
        if secret_name.is_empty() {
            return Err(BotError::Secret(format!(
                "invalid secret key path: '{}'",
                key_path
            )));
        }

        let url = format!("{}/api/v3/secrets/raw/{}", self.api_url, secret_name);
        debug!(secret_path = %secret_path, secret_name = %secret_name, "fetching secret");

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.settings.token)
            .query(&[
                ("workspaceId", self.settings.workspace_id.as_str()),
                ("environment", self.settings.environment.as_str()),
                ("secretPath", secret_path.as_str()),
                ("type", self.settings.secret_type.as_str()),
            ]);
        if let Some(key) = self.settings.e2ee_api_key.as_deref() {
            request = request.header("X-API-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::Secret(format!("{}: {}", key_path, e)))?
            .error_for_status()
            .map_err(|e| BotError::Secret(format!("{}: {}", key_path, e)))?;
        let body: RawSecretResponse = response
            .json()
            .await
            .map_err(|e| BotError::Secret(format!("{}: malformed response: {}", key_path, e)))?;

        Ok(body.secret.secret_value)
    }
}

#[async_trait]
impl CredentialProvider for InfisicalCredentials {
    fn name(&self) -> &'static str {
        "infisical"
    }

    async fn credentials(&self) -> Result<Credentials> {
        let telegram_bot_token = self
            .fetch_secret(&self.settings.telegram_bot_token_key_path)
            .await?;
        let openai_api_key = self
            .fetch_secret(&self.settings.openai_api_key_key_path)
            .await?;
        let openai_org_id = match self.settings.openai_org_id_key_path.as_deref() {
            Some(path) if !path.trim().is_empty() => non_blank(Some(&self.fetch_secret(path).await?)),
            _ => None,
        };

        Ok(Credentials {
            telegram_bot_token,
            openai_api_key,
            openai_org_id,
        })
    }
}

/// Picks the provider for `settings`: Infisical when configured, the config file otherwise.
pub fn credential_provider(settings: &Settings) -> Result<Arc<dyn CredentialProvider>> {
    let provider: Arc<dyn CredentialProvider> = match &settings.infisical {
        Some(infisical) => Arc::new(InfisicalCredentials::new(infisical.clone())?),
        None => Arc::new(StaticCredentials::from_settings(settings)?),
    };
    info!(provider = provider.name(), "credential provider selected");
    Ok(provider)
}

/// Splits `/folder/sub/NAME` into (`/folder/sub`, `NAME`). A bare name lives at `/`.
pub fn split_key_path(key_path: &str) -> (String, String) {
    let trimmed = key_path.trim();
    match trimmed.rfind('/') {
        Some(0) => ("/".to_string(), trimmed[1..].to_string()),
        Some(idx) => {
            let folder = &trimmed[..idx];
            let folder = if folder.starts_with('/') {
                folder.to_string()
            } else {
                format!("/{}", folder)
            };
            (folder, trimmed[idx + 1..].to_string())
        }
        None => ("/".to_string(), trimmed.to_string()),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
