use async_trait::async_trait;
use std::sync::Arc;

use super::Command;
use crate::core::Result;
use crate::token_counter::{TokenCounter, ENCODING_NAME};

/// `/count <text>`: number of BPE tokens and characters in the argument text.
pub struct CountCommand {
    counter: Arc<TokenCounter>,
}

impl CountCommand {
    pub fn new(counter: Arc<TokenCounter>) -> Self {
        Self { counter }
    }
}

#[async_trait]
impl Command for CountCommand {
    async fn execute(&self, args: &str) -> Result<String> {
        let tokens = self.counter.count(args)?;
        Ok(format!(
            "<b>{}</b> tokens in <b>{}</b> chars <i>({})</i>",
            tokens,
            args.chars().count(),
            ENCODING_NAME
        ))
    }
}
