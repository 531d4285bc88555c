//! Core types and traits: Handler, Bot, Message, HandlerResponse, error, logger.
//! Transport-agnostic; the Telegram layer converts into these types.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, TextFormat};
#[cfg(test)]
pub use bot::MockBot;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Document, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User,
};
