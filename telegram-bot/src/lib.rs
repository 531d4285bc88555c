//! # Telegram ChatGPT bot
//!
//! Relays Telegram messages from allow-listed users to the OpenAI chat completion API and sends
//! the answers back. Core (Handler, Bot, Message), chain (HandlerChain), handlers, commands and
//! the telegram layer (dispatcher, adapters) are wired together by [`components`].

pub mod chain;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod converter;
pub mod core;
pub mod handlers;
pub mod request_log;
pub mod router;
pub mod runner;
pub mod telegram;
pub mod token_counter;

pub use cli::{usage, Cli};

pub use self::core::{
    init_tracing, Bot, BotError, Chat, Document, Handler, HandlerResponse, Message, Result,
    TextFormat, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_dispatcher, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{credential_provider, CredentialProvider, Credentials, Settings};
pub use runner::run_bot;

pub use commands::{Command, CommandRegistry};
pub use components::{build_bot_components, build_command_registry, build_handler_chain, BotComponents};
pub use converter::MessageConverter;
pub use request_log::{RequestLog, RequestLogEntry};
pub use router::{route, Route};
pub use token_counter::TokenCounter;
