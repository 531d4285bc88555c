//! Conversions from teloxide types to core types.

use crate::core::{Chat, Document, Message, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
        }
    }
}

/// Telegram message to core message. The reply parent is converted one level deep.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        self.convert(true)
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn convert(&self, with_parent: bool) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.0,
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_default(),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: chat_type(&msg.chat).to_string(),
            },
            text: msg.text().filter(|t| !t.is_empty()).map(str::to_string),
            document: msg.document().map(|d| Document {
                file_id: d.file.id.0.clone(),
                file_name: d.file_name.clone(),
                mime_type: d.mime_type.as_ref().map(|m| m.to_string()),
                file_size: d.file.size,
            }),
            via_bot: msg.via_bot.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            edited: msg.edit_date().is_some(),
            created_at: msg.date,
            reply_to: if with_parent {
                msg.reply_to_message()
                    .map(|parent| Box::new(TelegramMessageWrapper(parent).convert(false)))
            } else {
                None
            },
        }
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
}
