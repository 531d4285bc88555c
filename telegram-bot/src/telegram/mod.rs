//! Telegram layer: teloxide adapters, the [`crate::core::Bot`] implementation, and the
//! long-polling dispatcher.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{TelegramBotAdapter, DOCUMENT_FETCH_TIMEOUT};
pub use runner::{bot_identity, run_dispatcher};
