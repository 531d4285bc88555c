//! Classifies an inbound message as a bot command, conversation input, or unsupported.

use crate::commands::parse_command;
use crate::core::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/name args`; `name` keeps its leading slash, without any `@botname` suffix.
    Command { name: String, args: String },
    Conversation,
    Unsupported,
}

pub fn route(message: &Message) -> Route {
    if let Some(text) = message.text.as_deref() {
        if let Some((name, args)) = parse_command(text) {
            return Route::Command { name, args };
        }
        return Route::Conversation;
    }

    if message.document.is_some() && !message.edited {
        return Route::Conversation;
    }

    Route::Unsupported
}
