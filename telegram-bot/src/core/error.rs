//! Error types for the bot core.

use thiserror::Error;

/// Top-level error (bot transport, secrets, tokenizer, config).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Secret error: {0}")]
    Secret(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
