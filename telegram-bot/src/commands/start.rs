use async_trait::async_trait;

use super::Command;
use crate::core::Result;

pub const MSG_START: &str = "This bot will answer your messages with ChatGPT API :-)";

/// `/start`: greeting, sent without a reply reference.
pub struct StartCommand;

#[async_trait]
impl Command for StartCommand {
    async fn execute(&self, _args: &str) -> Result<String> {
        Ok(MSG_START.to_string())
    }

    fn replies_to_message(&self) -> bool {
        false
    }
}
