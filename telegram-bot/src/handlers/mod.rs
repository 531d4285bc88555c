//! Chain handlers: allow-list and logging in `before()`, then command, conversation and
//! unsupported-message handling in `handle()`.

mod allow_list;
mod command;
mod conversation;
mod notifier;
mod unsupported;

pub use allow_list::{AllowListHandler, LoggingHandler};
pub use command::CommandHandler;
pub use conversation::{
    document_caption, user_agent, ConversationHandler, ANSWER_FILE_NAME, CAPTION_CHARS,
    MAX_MESSAGE_CHARS, MSG_ANSWER_FAILED, MSG_NO_USABLE_MESSAGES, MSG_SEND_FILE_FAILED,
    MSG_SEND_TEXT_FAILED,
};
pub use notifier::Notifier;
pub use unsupported::{UnsupportedHandler, MSG_TYPE_NOT_SUPPORTED};
